//! wc-draw library
//!
//! 카탈로그/규칙 파일 로딩, 부분 드로우 파일 해석, 조 편성 텍스트 출력

use anyhow::{bail, Context, Result};
use draw_core::models::{group_index, group_letter};
use draw_core::{world_cup_catalog, Assignment, DrawEngine, DrawRules, RevealStep, TeamCatalog};
use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Builds an engine from optional catalog and rules files.
///
/// Missing paths fall back to the embedded 2026 catalog and default rules.
pub fn load_engine(catalog: Option<&Path>, rules: Option<&Path>) -> Result<DrawEngine> {
    let catalog = match catalog {
        Some(path) => TeamCatalog::from_path(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
        None => world_cup_catalog().clone(),
    };

    let rules = match rules {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read rules file: {}", path.display()))?;
            DrawRules::from_json(&json)
                .with_context(|| format!("Failed to parse rules file: {}", path.display()))?
        }
        None => DrawRules::default(),
    };

    DrawEngine::new(catalog, rules).context("Invalid draw setup")
}

/// Reads a partial draw: a JSON array of team-code arrays, group A first.
///
/// The state must already satisfy the draw rules.
pub fn load_partial(path: &Path, engine: &DrawEngine) -> Result<Assignment> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read partial draw: {}", path.display()))?;
    let codes: Vec<Vec<String>> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse partial draw: {}", path.display()))?;
    partial_from_codes(&codes, engine)
}

pub fn partial_from_codes(codes: &[Vec<String>], engine: &DrawEngine) -> Result<Assignment> {
    let group_count = engine.rules().group_count;
    if codes.len() != group_count {
        bail!("partial draw has {} groups, expected {group_count}", codes.len());
    }

    let mut seen = HashSet::new();
    let mut groups = Vec::with_capacity(codes.len());
    for group in codes {
        let mut teams = Vec::with_capacity(group.len());
        for code in group {
            let team = engine
                .catalog()
                .team(code)
                .with_context(|| format!("unknown team code: {code}"))?;
            if !seen.insert(code.as_str()) {
                bail!("team {code} appears twice in the partial draw");
            }
            teams.push(team.clone());
        }
        groups.push(teams);
    }

    let partial = Assignment::from_groups(groups);
    engine.validate_partial(&partial).context("partial draw is not a legal state")?;
    Ok(partial)
}

/// Accepts a group letter ("C", "c") or a 0-based index ("2").
pub fn parse_group(input: &str, group_count: usize) -> Result<usize> {
    let input = input.trim();
    let index = match input.parse::<usize>() {
        Ok(index) => index,
        Err(_) => {
            let mut chars = input.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => group_index(c.to_ascii_uppercase())
                    .with_context(|| format!("not a group: {input}"))?,
                _ => bail!("not a group: {input}"),
            }
        }
    };
    if index >= group_count {
        bail!("group {input} is out of range (there are {group_count} groups)");
    }
    Ok(index)
}

/// Groups as a text table, four groups per row.
pub fn render_groups(assignment: &Assignment) -> String {
    const PER_ROW: usize = 4;
    const WIDTH: usize = 26;

    let mut out = String::new();
    for row in assignment.groups().chunks(PER_ROW) {
        let height = row.iter().map(|g| g.len()).max().unwrap_or(0);

        for group in row {
            let _ = write!(out, "{:<WIDTH$}", format!("Group {}", group.name));
        }
        out.push('\n');
        for group in row {
            let _ = write!(out, "{:<WIDTH$}", "-".repeat(WIDTH - 2));
        }
        out.push('\n');

        for slot in 0..height {
            for group in row {
                let cell = group
                    .teams
                    .get(slot)
                    .map(|t| format!("{} {} ({})", t.flag, t.code, t.confederation))
                    .unwrap_or_default();
                let _ = write!(out, "{cell:<WIDTH$}");
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// One line of a staged reveal.
pub fn render_step(step: &RevealStep<'_>, total: usize) -> String {
    format!(
        "[{:>2}/{total}] Pot {} | {} {} -> Group {}",
        step.index + 1,
        step.team.pot + 1,
        step.team.flag,
        step.team.name,
        group_letter(step.group)
    )
}
