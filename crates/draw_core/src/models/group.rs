use super::team::{Confederation, Team};
use serde::{Deserialize, Serialize};

/// Letter of the group at `index` (0 → 'A').
pub fn group_letter(index: usize) -> char {
    debug_assert!(index < 26, "group index out of letter range: {index}");
    (b'A' + (index % 26) as u8) as char
}

/// Index of a group letter ('A' → 0), case-insensitive.
pub fn group_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    upper.is_ascii_uppercase().then(|| (upper as u8 - b'A') as usize)
}

/// One group of the draw. Slot order matters only for the host slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: char,
    pub teams: Vec<Team>,
}

impl Group {
    pub fn new(index: usize) -> Self {
        Self { name: group_letter(index), teams: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.teams.iter().any(|t| t.code == code)
    }

    pub fn count_confederation(&self, confederation: Confederation) -> usize {
        self.teams.iter().filter(|t| t.confederation == confederation).count()
    }
}
