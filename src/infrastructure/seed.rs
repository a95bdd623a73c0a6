use crate::domain::errors::RepositoryResult;
use crate::domain::member::Member;
use crate::domain::repositories::MemberRepository;

/// Number of members created by the startup fixture
pub const SEED_MEMBER_COUNT: i32 = 100;

/// Inserts `user1..user{count}` with ages `1..=count` into an empty table
///
/// Returns the number of members inserted. A table that already holds
/// members is left alone, so restarting against a file database does not
/// duplicate the fixture.
pub async fn seed_members<R>(repository: &R, count: i32) -> RepositoryResult<u64>
where
    R: MemberRepository + ?Sized,
{
    let existing = repository.count().await?;
    if existing > 0 {
        tracing::info!("Skipping seed, {} members already present", existing);
        return Ok(0);
    }

    let mut inserted = 0;
    for i in 1..=count {
        repository
            .save(
                Member::builder()
                    .username(format!("user{}", i))
                    .age(i)
                    .build(),
            )
            .await?;
        inserted += 1;
    }

    tracing::info!("Seeded {} members", inserted);
    Ok(inserted)
}
