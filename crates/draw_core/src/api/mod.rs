//! JSON API: seeded draws and placement queries for UI/host integration.

pub mod draw_json;

mod rules_env;

pub use draw_json::{
    draw_json, error_codes, legal_groups_json, ApiError, DrawMode, DrawRequest, DrawResponse,
    LegalGroupsRequest, LegalGroupsResponse,
};
