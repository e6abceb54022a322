use serde::{Deserialize, Serialize};
use std::fmt;

/// Regional federation a national team belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confederation {
    Afc,
    Caf,
    Concacaf,
    Conmebol,
    Ofc,
    Uefa,
}

impl Confederation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confederation::Afc => "AFC",
            Confederation::Caf => "CAF",
            Confederation::Concacaf => "CONCACAF",
            Confederation::Conmebol => "CONMEBOL",
            Confederation::Ofc => "OFC",
            Confederation::Uefa => "UEFA",
        }
    }
}

impl fmt::Display for Confederation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A national team as it enters the draw.
///
/// `pot` is not part of the catalog JSON; it is filled in from the pot the
/// team was listed under when the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique three-letter code (e.g. "MEX")
    pub code: String,
    /// Display name
    pub name: String,
    /// Flag emoji, display only
    #[serde(default)]
    pub flag: String,
    pub confederation: Confederation,
    /// Seeding pot index (0-based)
    #[serde(default)]
    pub pot: usize,
}

impl Team {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        confederation: Confederation,
        pot: usize,
    ) -> Self {
        Self { code: code.into(), name: name.into(), flag: String::new(), confederation, pot }
    }

    /// Label for display: flag and name when a flag is known.
    pub fn display(&self) -> String {
        if self.flag.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.flag, self.name)
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({}, pot {})", self.code, self.confederation, self.pot + 1)
    }
}
