//! Evolving team → group mapping.
//!
//! An [`Assignment`] is a plain owned value. Engine entry points take it by
//! reference and hand back a new one; the caller keeps the authoritative copy.

use super::group::Group;
use super::team::Team;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    groups: Vec<Group>,
}

impl Assignment {
    /// Empty assignment with `group_count` groups named A, B, C, ...
    pub fn new(group_count: usize) -> Self {
        Self { groups: (0..group_count).map(Group::new).collect() }
    }

    /// Builds an assignment from raw group contents without checking any rule.
    pub fn from_groups(groups: Vec<Vec<Team>>) -> Self {
        let groups = groups
            .into_iter()
            .enumerate()
            .map(|(i, teams)| Group { teams, ..Group::new(i) })
            .collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn placed_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Group::is_empty)
    }

    /// Index of the group holding `code`.
    pub fn group_of(&self, code: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.contains(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.group_of(code).is_some()
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.groups.iter().flat_map(|g| g.teams.iter())
    }

    /// True when every group holds exactly `group_size` teams.
    pub fn is_full(&self, group_size: usize) -> bool {
        self.groups.iter().all(|g| g.len() == group_size)
    }

    /// New state with `team` appended to group `index`. `self` is untouched.
    pub fn with_team(&self, index: usize, team: Team) -> Self {
        let mut next = self.clone();
        next.push(index, team);
        next
    }

    /// Removes `code` from whichever group holds it.
    pub fn remove(&mut self, code: &str) -> Option<(usize, Team)> {
        let index = self.group_of(code)?;
        let group = &mut self.groups[index];
        let slot = group.teams.iter().position(|t| t.code == code)?;
        Some((index, group.teams.remove(slot)))
    }

    pub fn clear(&mut self) {
        for group in &mut self.groups {
            group.teams.clear();
        }
    }

    pub(crate) fn push(&mut self, index: usize, team: Team) {
        self.groups[index].teams.push(team);
    }

    pub(crate) fn pop(&mut self, index: usize) -> Option<Team> {
        self.groups[index].teams.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confederation;

    fn team(code: &str, pot: usize) -> Team {
        Team::new(code, code, Confederation::Caf, pot)
    }

    #[test]
    fn test_new_assignment_is_empty() {
        let assignment = Assignment::new(12);
        assert_eq!(assignment.group_count(), 12);
        assert_eq!(assignment.placed_count(), 0);
        assert!(assignment.is_empty());
        assert_eq!(assignment.groups()[11].name, 'L');
    }

    #[test]
    fn test_with_team_leaves_original_untouched() {
        let base = Assignment::new(2);
        let next = base.with_team(1, team("GHA", 3));
        assert!(base.is_empty());
        assert_eq!(next.group_of("GHA"), Some(1));
        assert_eq!(next.placed_count(), 1);
    }

    #[test]
    fn test_remove_returns_group_and_team() {
        let mut assignment =
            Assignment::from_groups(vec![vec![team("EGY", 2)], vec![team("SEN", 1), team("CPV", 3)]]);
        let (index, removed) = assignment.remove("SEN").unwrap();
        assert_eq!(index, 1);
        assert_eq!(removed.code, "SEN");
        assert_eq!(assignment.group(1).unwrap().teams[0].code, "CPV");
        assert!(assignment.remove("SEN").is_none());
    }

    #[test]
    fn test_is_full() {
        let assignment = Assignment::from_groups(vec![vec![team("A1", 0), team("A2", 1)]]);
        assert!(assignment.is_full(2));
        assert!(!assignment.is_full(4));
    }
}
