use crate::domain::repositories::CrudRepository;
use crate::domain::team::{Team, TeamId};

/// Repository trait for the Team entity
///
/// Teams only need the generic lifecycle operations; the members of a team
/// are queried through `MemberRepository::find_by_team`.
pub trait TeamRepository: CrudRepository<Team, TeamId> {}
