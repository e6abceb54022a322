//! Draw data model: teams, groups and the assignment between them.

pub mod assignment;
pub mod group;
pub mod team;

pub use assignment::Assignment;
pub use group::{group_index, group_letter, Group};
pub use team::{Confederation, Team};
