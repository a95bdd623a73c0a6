use super::value_objects::TeamId;
use std::fmt;

/// Team entity
///
/// A named group of members. The team side does not hold a member list:
/// membership is owned by the member's foreign key and the members of a
/// team are read with `MemberRepository::find_by_team`.
///
/// # Example
/// ```
/// use datajpa_api::domain::team::Team;
///
/// let team = Team::builder().name("teamA").build();
///
/// assert_eq!(team.name(), "teamA");
/// assert!(team.id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: Option<TeamId>,
    name: String,
}

impl Team {
    /// Starts building a new, unsaved team
    pub fn builder() -> TeamBuilder {
        TeamBuilder::default()
    }

    /// Renames the team; persisted on the next save
    pub fn change_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // ===== Getters =====

    /// Returns the team's ID, `None` until saved
    pub fn id(&self) -> Option<TeamId> {
        self.id
    }

    /// Returns the team's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records the identity assigned by storage on insert
    pub(crate) fn assign_id(&mut self, id: TeamId) {
        self.id = Some(id);
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(id: TeamId, name: String) -> Self {
        Self { id: Some(id), name }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Team(id={}, name={})", id, self.name),
            None => write!(f, "Team(id=null, name={})", self.name),
        }
    }
}

/// Builder for [`Team`]
#[derive(Debug, Default)]
pub struct TeamBuilder {
    name: String,
}

impl TeamBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn build(self) -> Team {
        Team {
            id: None,
            name: self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_creates_unsaved_team() {
        let team = Team::builder().name("teamA").build();

        assert_eq!(team.name(), "teamA");
        assert_eq!(team.id(), None);
    }

    #[test]
    fn from_persistence_carries_id() {
        let team = Team::from_persistence(TeamId::new(4), "teamB".to_string());

        assert_eq!(team.id(), Some(TeamId::new(4)));
        assert_eq!(team.name(), "teamB");
    }

    #[test]
    fn change_name_updates_name() {
        let mut team = Team::builder().name("old").build();
        team.change_name("new");

        assert_eq!(team.name(), "new");
    }

    #[test]
    fn display_shows_id_and_name() {
        let saved = Team::from_persistence(TeamId::new(1), "teamA".to_string());
        let unsaved = Team::builder().name("teamB").build();

        assert_eq!(saved.to_string(), "Team(id=1, name=teamA)");
        assert_eq!(unsaved.to_string(), "Team(id=null, name=teamB)");
    }
}
