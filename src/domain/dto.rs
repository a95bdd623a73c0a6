use serde::{Deserialize, Serialize};

use crate::domain::member::{Member, MemberId};

/// Read-only projection of a member for the wire
///
/// Carries the team's name instead of the team so the entity graph is never
/// serialized. `team_name` is `None` when the member has no team or when the
/// team was not fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: Option<MemberId>,
    pub username: String,
    pub team_name: Option<String>,
}

impl MemberDto {
    pub fn new(id: Option<MemberId>, username: impl Into<String>, team_name: Option<String>) -> Self {
        Self {
            id,
            username: username.into(),
            team_name,
        }
    }
}

impl From<&Member> for MemberDto {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id(),
            username: member.username().to_string(),
            team_name: member.team().map(|team| team.name().to_string()),
        }
    }
}
