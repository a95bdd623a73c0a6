//! SQL fragments and row mapping shared by the member repository adapters.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};

use crate::domain::member::{Member, MemberId, TeamRef};
use crate::domain::paging::{Direction, Sort, SortProperty};
use crate::domain::query::{Fetch, MemberQuery, Predicate};
use crate::domain::team::{Team, TeamId};

/// Member columns when the team is not fetched; `team_name` is always NULL
pub(crate) const MEMBER_COLUMNS: &str =
    "m.member_id, m.username, m.age, m.team_id, m.created_date, m.updated_date, NULL AS team_name";

/// Member columns plus the joined team's name
pub(crate) const MEMBER_TEAM_COLUMNS: &str =
    "m.member_id, m.username, m.age, m.team_id, m.created_date, m.updated_date, t.name AS team_name";

pub(crate) const TEAM_JOIN: &str = " LEFT JOIN team t ON t.team_id = m.team_id";

/// One member row, optionally with the team's name
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MemberRow {
    member_id: MemberId,
    username: String,
    age: i32,
    team_id: Option<TeamId>,
    created_date: DateTime<Utc>,
    updated_date: DateTime<Utc>,
    team_name: Option<String>,
}

impl MemberRow {
    /// Builds the entity; the team is loaded only when its name was selected
    pub(crate) fn into_member(self) -> Member {
        let team = match (self.team_id, self.team_name) {
            (Some(id), Some(name)) => Some(TeamRef::Loaded(Team::from_persistence(id, name))),
            (Some(id), None) => Some(TeamRef::Unloaded(id)),
            (None, _) => None,
        };

        Member::from_persistence(
            self.member_id,
            self.username,
            self.age,
            team,
            self.created_date,
            self.updated_date,
        )
    }
}

pub(crate) fn into_members(rows: Vec<MemberRow>) -> Vec<Member> {
    rows.into_iter().map(MemberRow::into_member).collect()
}

/// `SELECT ... FROM member m [LEFT JOIN team t] WHERE ...`
pub(crate) fn select_members(query: &MemberQuery, fetch: Fetch) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new("SELECT ");
    match fetch {
        Fetch::Lazy => {
            builder.push(MEMBER_COLUMNS).push(" FROM member m");
        }
        Fetch::Team => {
            builder
                .push(MEMBER_TEAM_COLUMNS)
                .push(" FROM member m")
                .push(TEAM_JOIN);
        }
    }
    push_predicates(&mut builder, query.predicates());
    builder
}

/// `SELECT COUNT(*) FROM member m WHERE ...`
pub(crate) fn count_members(query: &MemberQuery) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM member m");
    push_predicates(&mut builder, query.predicates());
    builder
}

pub(crate) fn push_predicates(builder: &mut QueryBuilder<'static, Sqlite>, predicates: &[Predicate]) {
    for (index, predicate) in predicates.iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });

        match predicate {
            Predicate::UsernameEq(username) => {
                builder.push("m.username = ").push_bind(username.clone());
            }
            Predicate::UsernameIn(usernames) if usernames.is_empty() => {
                builder.push("1 = 0");
            }
            Predicate::UsernameIn(usernames) => {
                builder.push("m.username IN (");
                let mut list = builder.separated(", ");
                for username in usernames {
                    list.push_bind(username.clone());
                }
                list.push_unseparated(")");
            }
            Predicate::AgeEq(age) => {
                builder.push("m.age = ").push_bind(*age);
            }
            Predicate::AgeGt(age) => {
                builder.push("m.age > ").push_bind(*age);
            }
            Predicate::AgeGe(age) => {
                builder.push("m.age >= ").push_bind(*age);
            }
            Predicate::TeamIdEq(team_id) => {
                builder.push("m.team_id = ").push_bind(*team_id);
            }
        }
    }
}

fn column(property: SortProperty) -> &'static str {
    match property {
        SortProperty::Id => "m.member_id",
        SortProperty::Username => "m.username",
        SortProperty::Age => "m.age",
    }
}

/// `ORDER BY ...`, always ending with the primary key so pages are stable
/// and unsorted results come back in insertion order
pub(crate) fn push_order_by(builder: &mut QueryBuilder<'static, Sqlite>, sort: &Sort) {
    builder.push(" ORDER BY ");
    for order in sort.orders() {
        builder.push(column(order.property)).push(match order.direction {
            Direction::Asc => " ASC, ",
            Direction::Desc => " DESC, ",
        });
    }
    builder.push("m.member_id ASC");
}

pub(crate) fn push_limit_offset(builder: &mut QueryBuilder<'static, Sqlite>, limit: i64, offset: i64) {
    builder
        .push(" LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::paging::Order;

    #[test]
    fn lazy_select_without_predicates() {
        let builder = select_members(&MemberQuery::new(), Fetch::Lazy);

        assert_eq!(
            builder.sql(),
            format!("SELECT {} FROM member m", MEMBER_COLUMNS)
        );
    }

    #[test]
    fn team_fetch_adds_left_join() {
        let builder = select_members(&MemberQuery::new(), Fetch::Team);

        assert!(builder.sql().contains("LEFT JOIN team t ON t.team_id = m.team_id"));
        assert!(builder.sql().contains("t.name AS team_name"));
    }

    #[test]
    fn predicates_are_joined_with_and() {
        let builder = select_members(
            &MemberQuery::new().username_eq("memberB").age_gt(15),
            Fetch::Lazy,
        );

        assert!(builder
            .sql()
            .ends_with(" WHERE m.username = ? AND m.age > ?"));
    }

    #[test]
    fn in_list_binds_each_value() {
        let builder = count_members(&MemberQuery::new().username_in(["a", "b", "c"]));

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM member m WHERE m.username IN (?, ?, ?)"
        );
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        let builder = count_members(&MemberQuery::new().username_in(Vec::<String>::new()));

        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM member m WHERE 1 = 0");
    }

    #[test]
    fn order_by_ends_with_primary_key() {
        let mut builder = QueryBuilder::new("SELECT 1 FROM member m");
        let sort = Sort::by(Direction::Desc, SortProperty::Username).and(Order::asc(SortProperty::Age));

        push_order_by(&mut builder, &sort);

        assert_eq!(
            builder.sql(),
            "SELECT 1 FROM member m ORDER BY m.username DESC, m.age ASC, m.member_id ASC"
        );
    }

    #[test]
    fn unsorted_orders_by_insertion() {
        let mut builder = QueryBuilder::new("SELECT 1 FROM member m");
        push_order_by(&mut builder, &Sort::unsorted());

        assert!(builder.sql().ends_with("ORDER BY m.member_id ASC"));
    }
}
