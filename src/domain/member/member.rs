use super::value_objects::MemberId;
use crate::domain::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use std::fmt;

/// Reference from a member to its team
///
/// A member row only stores the team's foreign key. Whether the team itself
/// is available depends on how the member was fetched: lazily (only the id)
/// or with the team graph (the full team).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamRef {
    /// Only the foreign key is known; load the team on demand
    Unloaded(TeamId),
    /// The team was fetched together with the member
    Loaded(Team),
}

impl TeamRef {
    /// Returns the referenced team's ID, if the team has one
    pub fn id(&self) -> Option<TeamId> {
        match self {
            TeamRef::Unloaded(id) => Some(*id),
            TeamRef::Loaded(team) => team.id(),
        }
    }

    /// Returns the team when it was eagerly fetched
    pub fn loaded(&self) -> Option<&Team> {
        match self {
            TeamRef::Unloaded(_) => None,
            TeamRef::Loaded(team) => Some(team),
        }
    }
}

/// Member entity
///
/// # Invariants
/// - `id` is assigned by storage on first insert and never changes
/// - `created_date` and `updated_date` are only written by the repository,
///   right before insert and update
/// - The team association is stored as a foreign key on the member; the
///   team side is a query-time view
///
/// # Example
/// ```
/// use datajpa_api::domain::member::Member;
/// use datajpa_api::domain::team::Team;
///
/// let team = Team::builder().name("teamA").build();
/// let member = Member::builder()
///     .username("memberA")
///     .age(10)
///     .team(team)
///     .build();
///
/// assert_eq!(member.username(), "memberA");
/// assert_eq!(member.team().map(|t| t.name()), Some("teamA"));
/// assert!(member.created_date().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Member {
    id: Option<MemberId>,
    username: String,
    age: i32,
    team: Option<TeamRef>,
    created_date: Option<DateTime<Utc>>,
    updated_date: Option<DateTime<Utc>>,
}

impl Member {
    /// Starts building a new, unsaved member
    pub fn builder() -> MemberBuilder {
        MemberBuilder::default()
    }

    /// Associates this member with a team
    ///
    /// The team must be saved before the member is saved, otherwise the
    /// repository rejects the member with a transient reference error.
    pub fn change_team(&mut self, team: &Team) {
        self.team = Some(TeamRef::Loaded(team.clone()));
    }

    /// Removes the team association
    pub fn leave_team(&mut self) {
        self.team = None;
    }

    pub fn change_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn change_age(&mut self, age: i32) {
        self.age = age;
    }

    // ===== Getters =====

    /// Returns the member's ID, `None` until saved
    pub fn id(&self) -> Option<MemberId> {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    /// Returns the team reference, loaded or not
    pub fn team_ref(&self) -> Option<&TeamRef> {
        self.team.as_ref()
    }

    /// Returns the team's ID without requiring the team to be loaded
    pub fn team_id(&self) -> Option<TeamId> {
        self.team.as_ref().and_then(TeamRef::id)
    }

    /// Returns the team if it was fetched with the member
    pub fn team(&self) -> Option<&Team> {
        self.team.as_ref().and_then(TeamRef::loaded)
    }

    pub fn created_date(&self) -> Option<DateTime<Utc>> {
        self.created_date
    }

    pub fn updated_date(&self) -> Option<DateTime<Utc>> {
        self.updated_date
    }

    /// Returns true once the member has been inserted
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    // ===== Persistence callbacks =====

    /// Stamps both timestamps right before the first insert
    pub(crate) fn pre_persist(&mut self, now: DateTime<Utc>) {
        self.created_date = Some(now);
        self.updated_date = Some(now);
    }

    /// Stamps the update timestamp right before an update
    pub(crate) fn pre_update(&mut self, now: DateTime<Utc>) {
        self.updated_date = Some(now);
    }

    pub(crate) fn assign_id(&mut self, id: MemberId) {
        self.id = Some(id);
    }

    /// Reconstructs a Member from persistence layer data
    ///
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: MemberId,
        username: String,
        age: i32,
        team: Option<TeamRef>,
        created_date: DateTime<Utc>,
        updated_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            username,
            age,
            team,
            created_date: Some(created_date),
            updated_date: Some(updated_date),
        }
    }
}

/// Two members are equal when they describe the same row: same identity,
/// scalar fields and team foreign key. Whether the team happens to be
/// loaded does not matter.
impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.username == other.username
            && self.age == other.age
            && self.team_id() == other.team_id()
    }
}

impl Eq for Member {}

// Association left out on purpose so printing never walks into the team.
impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(
                f,
                "Member(id={}, username={}, age={})",
                id, self.username, self.age
            ),
            None => write!(
                f,
                "Member(id=null, username={}, age={})",
                self.username, self.age
            ),
        }
    }
}

/// Builder for [`Member`]
#[derive(Debug, Default)]
pub struct MemberBuilder {
    username: String,
    age: i32,
    team: Option<Team>,
}

impl MemberBuilder {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.age = age;
        self
    }

    pub fn team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }

    pub fn build(self) -> Member {
        let mut member = Member {
            id: None,
            username: self.username,
            age: self.age,
            team: None,
            created_date: None,
            updated_date: None,
        };

        if let Some(team) = self.team {
            member.change_team(&team);
        }

        member
    }
}
