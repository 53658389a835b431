//! Properties text format for propstack.
//!
//! This crate provides the `PropertyMap` type and the line-oriented
//! `key=value` properties format it is read from and written to.

mod error;
mod map;
mod parse;
mod write;

pub use error::PropertiesError;
pub use map::PropertyMap;
pub use parse::parse;
pub use write::write;
