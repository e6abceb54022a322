//! 드로우 데이터 모듈
//!
//! - Team catalog (포트별 팀 목록, JSON)
//! - Embedded 2026 World Cup catalog

pub mod catalog;
pub mod embedded;

pub use catalog::{Pot, TeamCatalog};
pub use embedded::{world_cup_catalog, TEAMS_JSON};
