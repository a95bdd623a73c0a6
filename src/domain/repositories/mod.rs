// Repository contracts (ports)
// Implementations live in the infrastructure layer

pub mod crud_repository;
pub mod member_repository;
pub mod member_repository_custom;
pub mod team_repository;

pub use crud_repository::CrudRepository;
pub use member_repository::MemberRepository;
pub use member_repository_custom::MemberRepositoryCustom;
pub use team_repository::TeamRepository;
