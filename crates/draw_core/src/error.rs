use thiserror::Error;

/// Why a completed-looking assignment was rejected by global re-validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("expected {expected} placed teams, found {found}")]
    TeamCount { expected: usize, found: usize },

    #[error("group {group} has {found} teams, expected {expected}")]
    GroupSize { group: char, expected: usize, found: usize },

    #[error("team {code} appears more than once")]
    DuplicateTeam { code: String },

    #[error("team {code} is not part of the catalog")]
    UnknownTeam { code: String },

    #[error("group {group} holds two teams from pot {pot}")]
    PotClash { group: char, pot: usize },

    #[error("group {group} holds more than one {confederation} team")]
    ConfederationClash { group: char, confederation: String },

    #[error("group {group} holds {found} {confederation} teams (max {max})")]
    FlexibleOverflow { group: char, confederation: String, found: usize, max: usize },

    #[error("{found} groups hold two flexible-confederation teams (max {max})")]
    TooManyDoubledGroups { found: usize, max: usize },

    #[error("host {code} must open group {group}")]
    HostMisplaced { code: String, group: char },
}

/// Search-level failure reason, returned by [`crate::engine::search::place`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFailure {
    #[error("search space exhausted after {attempts} placement attempts")]
    Exhausted { attempts: usize },

    #[error("attempt budget of {budget} placements exceeded")]
    BudgetExceeded { budget: usize },

    #[error("search ended with an incomplete assignment ({placed} placed)")]
    Incomplete { placed: usize },
}

impl SearchFailure {
    pub fn attempts(&self) -> usize {
        match self {
            SearchFailure::Exhausted { attempts } => *attempts,
            SearchFailure::BudgetExceeded { budget } => *budget,
            SearchFailure::Incomplete { .. } => 0,
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected {expected} pots, found {found}")]
    PotCount { expected: usize, found: usize },

    #[error("{pot} must hold {expected} teams, found {found}")]
    PotSize { pot: String, expected: usize, found: usize },

    #[error("duplicate team code: {0}")]
    DuplicateCode(String),

    #[error("host team {0} is not in the catalog")]
    UnknownHost(String),

    #[error("{confederation} has {found} teams but only {groups} groups exist")]
    ConfederationOverflow { confederation: String, found: usize, groups: usize },
}

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("no legal assignment found ({retries} attempt(s), last: {last})")]
    Unsatisfiable { retries: u32, last: SearchFailure },

    #[error("draw result failed validation: {0}")]
    InvariantViolation(#[from] InvariantViolation),

    #[error("partial draw breaks the draw rules: {0}")]
    InvalidPartial(InvariantViolation),

    #[error("team {code} cannot be placed in group {group}")]
    IllegalPlacement { code: String, group: char },

    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("team {0} is already placed")]
    AlreadyPlaced(String),

    #[error("team {0} is not placed in any group")]
    NotPlaced(String),

    #[error("invalid group index: {0}")]
    InvalidGroup(usize),

    #[error("invalid draw rules: {0}")]
    Config(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl DrawError {
    /// Draw failures the user can recover from by restarting or picking
    /// another group.
    pub fn is_recoverable(&self) -> bool {
        match self {
            DrawError::Unsatisfiable { .. } => true,
            DrawError::InvariantViolation(_) => true,
            DrawError::IllegalPlacement { .. } => true,
            DrawError::AlreadyPlaced(_) => true,
            DrawError::NotPlaced(_) => true,
            DrawError::InvalidPartial(_) => false,
            DrawError::UnknownTeam(_) => false,
            DrawError::InvalidGroup(_) => false,
            DrawError::Config(_) => false,
            DrawError::Catalog(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DrawError>;
