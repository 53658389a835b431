//! Tests that drive override switching from the real process environment.
//!
//! These tests mutate process-wide environment variables, so they are
//! serialized and scoped with `temp_env`.

use anyhow::Result;
use serial_test::serial;

use propstack_resolver::{
    Bundle, BundledResources, LayerConfig, PlaceholderConfig, PlatformVariables,
    PropertiesResolver, PropertyMap, candidate_file_names,
};

fn bundle() -> Bundle {
    Bundle::new()
        .with(
            "config/default.properties",
            &b"platform=unset\nhome=${_PROPSTACK_HOME:/tmp}\n"[..],
        )
        .with("config/environments/dev.properties", &b"platform=dev\n"[..])
        .with(
            "config/environments/dev.x64.properties",
            &b"platform=dev-x64\n"[..],
        )
}

fn platform_config() -> LayerConfig {
    let mut config = LayerConfig::new(Box::new(BundledResources::new(bundle(), "/config")));
    config.switch_recipes = vec![
        vec!["_PROPSTACK_ENV".to_string()],
        vec!["_PROPSTACK_ENV".to_string(), "_PROPSTACK_ARCH".to_string()],
    ];
    config
}

#[test]
#[serial]
fn test_environment_variable_selects_override_file() -> Result<()> {
    temp_env::with_vars(
        [("_PROPSTACK_ENV", Some("dev")), ("_PROPSTACK_ARCH", None)],
        || -> Result<()> {
            let resolver =
                PropertiesResolver::new(platform_config(), PlaceholderConfig::default())?;
            assert_eq!(resolver.property("platform")?.as_deref(), Some("dev"));
            Ok(())
        },
    )
}

#[test]
#[serial]
fn test_two_variable_recipe_overrides_single_variable_recipe() -> Result<()> {
    temp_env::with_vars(
        [
            ("_PROPSTACK_ENV", Some("dev")),
            ("_PROPSTACK_ARCH", Some("x64")),
        ],
        || -> Result<()> {
            let resolver =
                PropertiesResolver::new(platform_config(), PlaceholderConfig::default())?;
            assert_eq!(resolver.property("platform")?.as_deref(), Some("dev-x64"));
            Ok(())
        },
    )
}

#[test]
#[serial]
fn test_unset_variables_leave_the_defaults() -> Result<()> {
    temp_env::with_vars(
        [
            ("_PROPSTACK_ENV", None::<&str>),
            ("_PROPSTACK_ARCH", None),
        ],
        || -> Result<()> {
            let resolver =
                PropertiesResolver::new(platform_config(), PlaceholderConfig::default())?;
            assert_eq!(resolver.property("platform")?.as_deref(), Some("unset"));
            Ok(())
        },
    )
}

#[test]
#[serial]
fn test_placeholder_falls_back_to_process_environment() -> Result<()> {
    temp_env::with_vars(
        [
            ("_PROPSTACK_ENV", None::<&str>),
            ("_PROPSTACK_HOME", Some("/srv/app")),
        ],
        || -> Result<()> {
            let resolver =
                PropertiesResolver::new(platform_config(), PlaceholderConfig::default())?;
            assert_eq!(resolver.property("home")?.as_deref(), Some("/srv/app"));
            Ok(())
        },
    )
}

#[test]
#[serial]
fn test_placeholder_default_used_when_environment_unset() -> Result<()> {
    temp_env::with_vars(
        [
            ("_PROPSTACK_ENV", None::<&str>),
            ("_PROPSTACK_HOME", None),
        ],
        || -> Result<()> {
            let resolver =
                PropertiesResolver::new(platform_config(), PlaceholderConfig::default())?;
            assert_eq!(resolver.property("home")?.as_deref(), Some("/tmp"));
            Ok(())
        },
    )
}

#[test]
#[serial]
fn test_system_override_map_wins_over_process_environment() {
    temp_env::with_vars([("_PROPSTACK_ENV", Some("dev"))], || {
        let overrides: PropertyMap = [("_PROPSTACK_ENV", "prod")].into_iter().collect();
        let vars = PlatformVariables::with_system_overrides(overrides);
        let names = candidate_file_names(
            &[vec!["_PROPSTACK_ENV".to_string()]],
            &vars,
            '.',
            "environments/",
            '.',
            "properties",
        );
        assert_eq!(names, vec!["environments/prod.properties"]);
    });
}
