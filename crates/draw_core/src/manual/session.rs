//! Interactive draw: the user picks teams and groups one at a time.

use crate::data::{Pot, TeamCatalog};
use crate::engine::{DrawEngine, DrawResult};
use crate::error::{DrawError, Result};
use crate::models::{group_letter, Assignment, Team};
use crate::rules::DrawRules;
use rand::Rng;
use tracing::{info, warn};

/// A manual draw in progress.
///
/// Every placement and move goes through the same predicate the automatic
/// draw uses, so the session state always satisfies the per-group rules.
#[derive(Debug, Clone)]
pub struct ManualDraw {
    engine: DrawEngine,
    assignment: Assignment,
    /// Pot the session is working through; advances when it empties
    pot_cursor: usize,
}

impl ManualDraw {
    pub fn new(engine: DrawEngine) -> Self {
        let assignment = engine.empty_assignment();
        Self { engine, assignment, pot_cursor: 0 }
    }

    pub fn world_cup_2026() -> Result<Self> {
        DrawEngine::world_cup_2026().map(Self::new)
    }

    /// Back to an empty assignment with every pot full.
    pub fn reset(&mut self) {
        self.assignment.clear();
        self.pot_cursor = 0;
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn rules(&self) -> &DrawRules {
        self.engine.rules()
    }

    pub fn catalog(&self) -> &TeamCatalog {
        self.engine.catalog()
    }

    /// Pots with the placed teams taken out.
    pub fn remaining_pots(&self) -> Vec<Pot> {
        self.engine.remaining_pots(&self.assignment)
    }

    /// Index of the pot being drawn, `None` once every team is placed.
    pub fn current_pot(&self) -> Option<usize> {
        (!self.is_finished()).then_some(self.pot_cursor)
    }

    pub fn is_finished(&self) -> bool {
        self.assignment.placed_count() == self.engine.catalog().len()
    }

    /// Groups `code` may go to right now.
    ///
    /// For a team that is already placed this answers "where may it move":
    /// its own group is excluded from every count.
    pub fn legal_groups(&self, code: &str) -> Result<Vec<usize>> {
        let team = self.team(code)?;
        let excluded = self.assignment.group_of(code);
        let mut groups = self.engine.legal_groups(team, &self.assignment, excluded);
        if let Some(own) = excluded {
            groups.retain(|&g| g != own);
        }
        Ok(groups)
    }

    /// Takes `code` out of its pot and puts it into group `group`.
    pub fn place(&mut self, code: &str, group: usize) -> Result<()> {
        self.check_group(group)?;
        let team = self.team(code)?.clone();
        if self.assignment.contains(code) {
            return Err(DrawError::AlreadyPlaced(code.to_string()));
        }
        if !self.engine.can_place(&team, group, &self.assignment, None) {
            warn!(team = code, group = %group_letter(group), "placement rejected");
            return Err(DrawError::IllegalPlacement { code: code.to_string(), group: group_letter(group) });
        }

        info!(team = code, group = %group_letter(group), "team placed");
        self.assignment.push(group, team);
        self.advance_pot();
        Ok(())
    }

    /// Relocates a placed team. Moving a team to its own group does nothing.
    pub fn move_team(&mut self, code: &str, group: usize) -> Result<()> {
        self.check_group(group)?;
        let team = self.team(code)?.clone();
        let Some(from) = self.assignment.group_of(code) else {
            return Err(DrawError::NotPlaced(code.to_string()));
        };
        if from == group {
            return Ok(());
        }
        if !self.engine.can_place(&team, group, &self.assignment, Some(from)) {
            warn!(team = code, from = %group_letter(from), to = %group_letter(group), "move rejected");
            return Err(DrawError::IllegalPlacement { code: code.to_string(), group: group_letter(group) });
        }

        self.assignment.remove(code);
        self.assignment.push(group, team);
        info!(team = code, from = %group_letter(from), to = %group_letter(group), "team moved");
        Ok(())
    }

    /// Places every remaining team automatically.
    ///
    /// The session keeps its state when no legal completion is found, so the
    /// user can move teams around or reset.
    pub fn complete<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<DrawResult> {
        let result = self.engine.complete(&self.assignment, rng)?;
        self.assignment = result.assignment.clone();
        self.advance_pot();
        Ok(result)
    }

    fn team(&self, code: &str) -> Result<&Team> {
        self.engine.catalog().team(code).ok_or_else(|| DrawError::UnknownTeam(code.to_string()))
    }

    fn check_group(&self, group: usize) -> Result<()> {
        if group >= self.assignment.group_count() {
            return Err(DrawError::InvalidGroup(group));
        }
        Ok(())
    }

    fn advance_pot(&mut self) {
        let pots = self.engine.catalog().pots();
        while self.pot_cursor + 1 < pots.len()
            && pots[self.pot_cursor].teams.iter().all(|t| self.assignment.contains(&t.code))
        {
            self.pot_cursor += 1;
        }
    }
}
