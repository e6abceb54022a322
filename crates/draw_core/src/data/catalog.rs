//! Team catalog: the pots that feed a draw.
//!
//! The JSON shape is `{"pots": [{"name": "Pot 1", "teams": [...]}, ...]}`.
//! Team entries carry no pot field; the pot index comes from list position.

use crate::error::CatalogError;
use crate::models::{Confederation, Team};
use crate::rules::DrawRules;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// A seeding tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub name: String,
    pub teams: Vec<Team>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    pots: Vec<Pot>,
}

/// Immutable reference data for a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamCatalog {
    pots: Vec<Pot>,
}

impl TeamCatalog {
    /// Builds a catalog, stamping each team with the index of its pot.
    /// No validation; see [`TeamCatalog::validate`].
    pub fn new(mut pots: Vec<Pot>) -> Self {
        for (index, pot) in pots.iter_mut().enumerate() {
            for team in &mut pot.teams {
                team.pot = index;
            }
        }
        Self { pots }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.pots))
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn len(&self) -> usize {
        self.pots.iter().map(|p| p.teams.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.pots.iter().flat_map(|p| p.teams.iter())
    }

    pub fn team(&self, code: &str) -> Option<&Team> {
        self.teams().find(|t| t.code == code)
    }

    /// Checks the catalog against the shape and limits of `rules`.
    pub fn validate(&self, rules: &DrawRules) -> Result<(), CatalogError> {
        if self.pots.len() != rules.group_size {
            return Err(CatalogError::PotCount {
                expected: rules.group_size,
                found: self.pots.len(),
            });
        }
        for pot in &self.pots {
            if pot.teams.len() != rules.group_count {
                return Err(CatalogError::PotSize {
                    pot: pot.name.clone(),
                    expected: rules.group_count,
                    found: pot.teams.len(),
                });
            }
        }

        let mut seen = HashSet::new();
        for team in self.teams() {
            if !seen.insert(team.code.as_str()) {
                return Err(CatalogError::DuplicateCode(team.code.clone()));
            }
        }

        for host in &rules.hosts {
            if !seen.contains(host.team.as_str()) {
                return Err(CatalogError::UnknownHost(host.team.clone()));
            }
        }

        let mut per_confederation: HashMap<Confederation, usize> = HashMap::new();
        for team in self.teams() {
            *per_confederation.entry(team.confederation).or_default() += 1;
        }
        for (confederation, found) in per_confederation {
            let capacity = if confederation == rules.flexible_confederation {
                flexible_capacity(rules)
            } else {
                rules.group_count
            };
            if found > capacity {
                return Err(CatalogError::ConfederationOverflow {
                    confederation: confederation.to_string(),
                    found,
                    groups: rules.group_count,
                });
            }
        }

        Ok(())
    }
}

/// Most flexible-confederation teams the groups can hold together.
fn flexible_capacity(rules: &DrawRules) -> usize {
    let max = rules.max_flexible_per_group;
    if max <= 1 {
        return rules.group_count;
    }
    let doubled = rules.max_doubled_groups.min(rules.group_count);
    rules.group_count + doubled * (max - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::HostSlot;
    use std::io::Write;

    fn small_json() -> &'static str {
        r#"{"pots":[
            {"name":"Pot 1","teams":[
                {"code":"AAA","name":"Alpha","confederation":"UEFA"},
                {"code":"BBB","name":"Bravo","confederation":"CAF"}]},
            {"name":"Pot 2","teams":[
                {"code":"CCC","name":"Charlie","confederation":"AFC"},
                {"code":"DDD","name":"Delta","confederation":"UEFA"}]}
        ]}"#
    }

    fn small_rules() -> DrawRules {
        DrawRules { group_count: 2, group_size: 2, hosts: vec![], ..DrawRules::default() }
    }

    #[test]
    fn test_pot_index_stamped_from_position() {
        let catalog = TeamCatalog::from_json(small_json()).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.team("BBB").unwrap().pot, 0);
        assert_eq!(catalog.team("DDD").unwrap().pot, 1);
        assert!(catalog.validate(&small_rules()).is_ok());
    }

    #[test]
    fn test_pot_size_mismatch() {
        let catalog = TeamCatalog::from_json(small_json()).unwrap();
        let rules = DrawRules { group_count: 3, ..small_rules() };
        assert!(matches!(
            catalog.validate(&rules),
            Err(CatalogError::PotSize { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let json = small_json().replace("DDD", "AAA");
        let catalog = TeamCatalog::from_json(&json).unwrap();
        assert!(matches!(
            catalog.validate(&small_rules()),
            Err(CatalogError::DuplicateCode(code)) if code == "AAA"
        ));
    }

    #[test]
    fn test_missing_host_rejected() {
        let catalog = TeamCatalog::from_json(small_json()).unwrap();
        let rules = DrawRules { hosts: vec![HostSlot::new("ZZZ", 0)], ..small_rules() };
        assert!(matches!(catalog.validate(&rules), Err(CatalogError::UnknownHost(_))));
    }

    #[test]
    fn test_strict_confederation_overflow() {
        let json = small_json().replace("\"AFC\"", "\"CAF\"").replace(
            r#""code":"AAA","name":"Alpha","confederation":"UEFA""#,
            r#""code":"AAA","name":"Alpha","confederation":"CAF""#,
        );
        let catalog = TeamCatalog::from_json(&json).unwrap();
        assert!(matches!(
            catalog.validate(&small_rules()),
            Err(CatalogError::ConfederationOverflow { found: 3, groups: 2, .. })
        ));
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(small_json().as_bytes()).unwrap();
        let catalog = TeamCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.pots()[1].name, "Pot 2");
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TeamCatalog::from_path(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_flexible_capacity() {
        assert_eq!(flexible_capacity(&DrawRules::default()), 16);
        let single = DrawRules { max_flexible_per_group: 1, ..DrawRules::default() };
        assert_eq!(flexible_capacity(&single), 12);
    }
}
