//! Global re-validation of a finished draw.
//!
//! The search only ever places teams through the predicate, but a result is
//! still checked in full before it is handed out.

use super::config::DrawRules;
use crate::data::TeamCatalog;
use crate::error::InvariantViolation;
use crate::models::{Assignment, Group};
use std::collections::HashSet;

/// Checks every completed-draw invariant against `catalog` and `rules`.
pub fn validate_assignment(
    assignment: &Assignment,
    catalog: &TeamCatalog,
    rules: &DrawRules,
) -> Result<(), InvariantViolation> {
    let expected = catalog.len();
    let found = assignment.placed_count();
    if found != expected {
        return Err(InvariantViolation::TeamCount { expected, found });
    }

    for group in assignment.groups() {
        if group.len() != rules.group_size {
            return Err(InvariantViolation::GroupSize {
                group: group.name,
                expected: rules.group_size,
                found: group.len(),
            });
        }
    }

    let mut seen = HashSet::new();
    for team in assignment.teams() {
        if catalog.team(&team.code).is_none() {
            return Err(InvariantViolation::UnknownTeam { code: team.code.clone() });
        }
        if !seen.insert(team.code.as_str()) {
            return Err(InvariantViolation::DuplicateTeam { code: team.code.clone() });
        }
    }

    validate_groups(assignment, rules)
}

/// Per-group rules only (pots, confederations, host slots). Holds for any
/// state reached through legal placements, complete or not.
pub fn validate_groups(assignment: &Assignment, rules: &DrawRules) -> Result<(), InvariantViolation> {
    let flexible = rules.flexible_confederation;
    let mut doubled = 0;

    for group in assignment.groups() {
        check_pots(group)?;

        let mut strict = HashSet::new();
        for team in group.teams.iter().filter(|t| t.confederation != flexible) {
            if !strict.insert(team.confederation) {
                return Err(InvariantViolation::ConfederationClash {
                    group: group.name,
                    confederation: team.confederation.to_string(),
                });
            }
        }

        let flexible_count = group.count_confederation(flexible);
        if flexible_count > rules.max_flexible_per_group {
            return Err(InvariantViolation::FlexibleOverflow {
                group: group.name,
                confederation: flexible.to_string(),
                found: flexible_count,
                max: rules.max_flexible_per_group,
            });
        }
        if rules.max_flexible_per_group > 1 && flexible_count == rules.max_flexible_per_group {
            doubled += 1;
        }
    }

    if doubled > rules.max_doubled_groups {
        return Err(InvariantViolation::TooManyDoubledGroups {
            found: doubled,
            max: rules.max_doubled_groups,
        });
    }

    for host in &rules.hosts {
        let opener = assignment.group(host.group).and_then(|g| g.teams.first());
        let placed_elsewhere = assignment.group_of(&host.team).is_some_and(|g| g != host.group);
        let slot_taken = opener.is_some_and(|t| t.code != host.team);
        if placed_elsewhere || slot_taken {
            return Err(InvariantViolation::HostMisplaced {
                code: host.team.clone(),
                group: crate::models::group_letter(host.group),
            });
        }
    }

    Ok(())
}

fn check_pots(group: &Group) -> Result<(), InvariantViolation> {
    let mut pots = HashSet::new();
    for team in &group.teams {
        if !pots.insert(team.pot) {
            return Err(InvariantViolation::PotClash { group: group.name, pot: team.pot + 1 });
        }
    }
    Ok(())
}
