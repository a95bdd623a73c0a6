use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned identity of a team
///
/// Maps to the `team.team_id` column. A team only has an id once it has
/// been saved.
///
/// # Example
/// ```
/// use datajpa_api::domain::team::value_objects::TeamId;
///
/// let id = TeamId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct TeamId(i64);

impl TeamId {
    /// Wraps a raw primary key value
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw primary key value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for TeamId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
