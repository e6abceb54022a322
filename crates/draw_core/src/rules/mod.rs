//! Draw constraint model: parameters, the placement predicate and
//! whole-assignment validation.

pub mod config;
pub mod predicate;
pub mod validate;

pub use config::{DrawRules, HostSlot};
pub use predicate::{can_place, legal_groups};
pub use validate::{validate_assignment, validate_groups};
