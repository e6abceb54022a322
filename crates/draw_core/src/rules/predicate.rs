//! Placement legality check.
//!
//! [`can_place`] is pure and is used both by the search and by callers that
//! only want to know whether a group is open for a team (greying out a group
//! in a manual draw). Rules are checked in a fixed order and the first
//! failing rule rejects:
//!
//! 1. host slot
//! 2. pot uniqueness
//! 3. capacity
//! 4. confederation (flexible confederation capped per group and globally)
//!
//! `excluded` names the group a team is being moved out of. The team's own
//! entry in that group is ignored by every count, so relocating a team never
//! conflicts with itself.

use super::config::DrawRules;
use crate::models::{Assignment, Team};

/// How an empty host group is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HostVacancy {
    /// Only the host may enter its empty group.
    Reserved,
    /// Ignore the reservation. Used by lookahead, where the host is still
    /// queued and will open the group before anyone else arrives.
    Relaxed,
}

/// Assignment as seen with the moving team lifted out of its old group.
struct View<'a> {
    assignment: &'a Assignment,
    moving: &'a str,
    excluded: Option<usize>,
}

impl<'a> View<'a> {
    fn members(&self, index: usize) -> impl Iterator<Item = &'a Team> + 'a {
        let skip = self.excluded == Some(index);
        let moving = self.moving;
        self.assignment.groups()[index].teams.iter().filter(move |t| !(skip && t.code == moving))
    }
}

/// Whether `team` may legally take a slot in group `group`.
pub fn can_place(
    team: &Team,
    group: usize,
    assignment: &Assignment,
    rules: &DrawRules,
    excluded: Option<usize>,
) -> bool {
    admits(team, group, assignment, rules, excluded, HostVacancy::Reserved)
}

/// Every group index `team` may currently go to.
pub fn legal_groups(
    team: &Team,
    assignment: &Assignment,
    rules: &DrawRules,
    excluded: Option<usize>,
) -> Vec<usize> {
    (0..assignment.group_count())
        .filter(|&g| can_place(team, g, assignment, rules, excluded))
        .collect()
}

pub(crate) fn admits(
    team: &Team,
    group: usize,
    assignment: &Assignment,
    rules: &DrawRules,
    excluded: Option<usize>,
    vacancy: HostVacancy,
) -> bool {
    if group >= assignment.group_count() {
        return false;
    }
    let view = View { assignment, moving: &team.code, excluded };

    // 1. host slot
    match rules.host_group_of(&team.code) {
        Some(host_group) if host_group != group => return false,
        Some(_) => {}
        None => {
            if vacancy == HostVacancy::Reserved
                && rules.host_of_group(group).is_some()
                && view.members(group).next().is_none()
            {
                return false;
            }
        }
    }

    // 2. pot uniqueness
    if view.members(group).any(|t| t.pot == team.pot) {
        return false;
    }

    // 3. capacity
    if view.members(group).count() >= rules.group_size {
        return false;
    }

    // 4. confederation
    let flexible = rules.flexible_confederation;
    if team.confederation == flexible {
        let in_group = view.members(group).filter(|t| t.confederation == flexible).count();
        if in_group >= rules.max_flexible_per_group {
            return false;
        }
        if rules.max_flexible_per_group > 1 && in_group + 1 == rules.max_flexible_per_group {
            let doubled = (0..assignment.group_count())
                .filter(|&g| {
                    view.members(g).filter(|t| t.confederation == flexible).count()
                        == rules.max_flexible_per_group
                })
                .count();
            if doubled >= rules.max_doubled_groups {
                return false;
            }
        }
    } else if view.members(group).any(|t| t.confederation == team.confederation) {
        return false;
    }

    true
}
