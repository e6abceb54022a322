//! Draw order: which team is drawn next.

use crate::data::Pot;
use crate::models::{Assignment, Team};
use crate::rules::DrawRules;
use rand::seq::SliceRandom;
use rand::Rng;

/// Builds the order in which unplaced teams are drawn.
///
/// Hosts that are not yet in the assignment come first, in the order the
/// rules list them. Every other unplaced team follows pot by pot, shuffled
/// within its pot.
pub fn draw_queue<R: Rng + ?Sized>(
    pots: &[Pot],
    assignment: &Assignment,
    rules: &DrawRules,
    rng: &mut R,
) -> Vec<Team> {
    let pending = |team: &&Team| !assignment.contains(&team.code);

    let mut queue: Vec<Team> = rules
        .hosts
        .iter()
        .filter_map(|host| {
            pots.iter().flat_map(|p| p.teams.iter()).find(|t| t.code == host.team)
        })
        .filter(pending)
        .cloned()
        .collect();

    for pot in pots {
        let mut rest: Vec<Team> = pot
            .teams
            .iter()
            .filter(pending)
            .filter(|t| !rules.is_host(&t.code))
            .cloned()
            .collect();
        rest.shuffle(rng);
        queue.extend(rest);
    }

    queue
}
