//! Typed member queries.
//!
//! A [`MemberQuery`] is a conjunction of predicates over member columns plus
//! an optional sort. Repositories compile it to SQL with bound parameters.
//! [`Fetch`] says which associations are loaded with the result.

use crate::domain::paging::Sort;
use crate::domain::team::TeamId;

/// A single condition on a member row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    UsernameEq(String),
    UsernameIn(Vec<String>),
    AgeEq(i32),
    AgeGt(i32),
    AgeGe(i32),
    TeamIdEq(TeamId),
}

/// Conjunction of predicates with an optional sort
///
/// # Example
/// ```
/// use datajpa_api::domain::query::{MemberQuery, Predicate};
///
/// let query = MemberQuery::new().username_eq("memberB").age_gt(15);
///
/// assert_eq!(
///     query.predicates(),
///     &[Predicate::UsernameEq("memberB".to_string()), Predicate::AgeGt(15)]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberQuery {
    predicates: Vec<Predicate>,
    sort: Sort,
}

impl MemberQuery {
    /// Matches every member
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username_eq(self, username: impl Into<String>) -> Self {
        self.and(Predicate::UsernameEq(username.into()))
    }

    pub fn username_in<I, S>(self, usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.and(Predicate::UsernameIn(
            usernames.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn age_eq(self, age: i32) -> Self {
        self.and(Predicate::AgeEq(age))
    }

    pub fn age_gt(self, age: i32) -> Self {
        self.and(Predicate::AgeGt(age))
    }

    pub fn age_ge(self, age: i32) -> Self {
        self.and(Predicate::AgeGe(age))
    }

    pub fn team_id_eq(self, team_id: TeamId) -> Self {
        self.and(Predicate::TeamIdEq(team_id))
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn sorted_by(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }
}

/// Which associations are loaded together with the members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fetch {
    /// Only the team's foreign key is read
    #[default]
    Lazy,
    /// The team is joined and loaded in the same round trip
    Team,
}

/// Named fetch graph loading every association of a member
pub const MEMBER_ALL_GRAPH: Fetch = Fetch::Team;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::paging::{Direction, SortProperty};

    #[test]
    fn new_query_matches_everything() {
        let query = MemberQuery::new();
        assert!(query.predicates().is_empty());
        assert!(query.sort().is_unsorted());
    }

    #[test]
    fn predicates_are_kept_in_order() {
        let query = MemberQuery::new()
            .username_in(["memberA", "memberB"])
            .age_ge(20)
            .team_id_eq(TeamId::new(1));

        assert_eq!(
            query.predicates(),
            &[
                Predicate::UsernameIn(vec!["memberA".to_string(), "memberB".to_string()]),
                Predicate::AgeGe(20),
                Predicate::TeamIdEq(TeamId::new(1)),
            ]
        );
    }

    #[test]
    fn sorted_by_replaces_sort() {
        let query = MemberQuery::new().sorted_by(Sort::by(Direction::Desc, SortProperty::Age));
        assert_eq!(query.sort().orders().len(), 1);
    }

    #[test]
    fn default_fetch_is_lazy() {
        assert_eq!(Fetch::default(), Fetch::Lazy);
        assert_eq!(MEMBER_ALL_GRAPH, Fetch::Team);
    }
}
