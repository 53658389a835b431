//! The layer resolver: default file plus ordered override layers.
//!
//! Responsibilities:
//! - Compute the ordered candidate override file names from switch-variable
//!   recipes.
//! - Merge each available layer on top of the accumulated properties, with
//!   strict or lenient consistency checking.
//! - Run the optional operational-override pass on top of the primary result.
//!
//! Does NOT handle:
//! - Placeholder resolution inside values (see `placeholder`); layer values
//!   pass through unmodified.
//! - Fetching bytes (see `resource`) or parsing text (propstack-format).
//!
//! Invariants:
//! - Candidate merge order is exactly recipe order; within the operational
//!   pass the secondary default file is attempted before its candidates.
//! - An absent override candidate is skipped silently; an absent default file
//!   is fatal only under strict merging.

mod candidates;
mod merge;

#[cfg(test)]
mod tests;

pub use candidates::candidate_file_names;
pub use merge::{merge_layer, resolve_layers};
