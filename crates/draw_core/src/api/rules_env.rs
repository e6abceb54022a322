use crate::rules::DrawRules;
use std::{env, fs};

pub(crate) const RULES_PATH_ENV: &str = "WC_DRAW_RULES_PATH";

/// Rules from the file named by `WC_DRAW_RULES_PATH`, if set.
pub(crate) fn rules_from_env() -> Result<Option<DrawRules>, String> {
    let Ok(path) = env::var(RULES_PATH_ENV) else {
        return Ok(None);
    };
    load_rules(&path)
}

fn load_rules(path: &str) -> Result<Option<DrawRules>, String> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read draw rules from {RULES_PATH_ENV}='{path}': {e}"))?;

    let rules = DrawRules::from_json(&content)
        .map_err(|e| format!("Failed to parse draw rules JSON from {RULES_PATH_ENV}='{path}': {e}"))?;

    rules
        .validate()
        .map_err(|e| format!("Invalid draw rules from {RULES_PATH_ENV}='{path}': {e}"))?;

    Ok(Some(rules))
}
