//! Caller-side recovery from optimistic-lock conflicts
//!
//! Repositories surface [`DomainError::VersionConflict`] and never retry.
//! Callers that want last-writer-reapplies semantics re-read the post,
//! apply their edit to the fresh copy, and try again.

use tracing::debug;

use crate::entities::Post;
use crate::error::DomainError;
use crate::traits::{PostRepository, RepoResult};
use crate::value_objects::Id;

/// Re-read, re-apply `edit`, and update until the write lands
///
/// Gives up after `max_attempts` (at least one) and returns the last
/// conflict. Any other failure is returned immediately.
pub async fn retry_on_conflict<F>(
    posts: &dyn PostRepository,
    id: Id,
    max_attempts: u32,
    mut edit: F,
) -> RepoResult<Post>
where
    F: FnMut(&mut Post) + Send,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let mut post = posts.get_by_id(id).await?;
        edit(&mut post);

        match posts.update(&post).await {
            Err(DomainError::VersionConflict { expected, .. }) if attempt < max_attempts => {
                debug!(post_id = %id, expected, attempt, "stale version, re-reading post");
                attempt += 1;
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockPostRepository;
    use chrono::Utc;
    use mockall::Sequence;

    fn post_at(version: i64) -> Post {
        let now = Utc::now();
        Post {
            id: Id::new(1),
            title: "title".to_string(),
            content: "content".to_string(),
            user_id: Id::new(2),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            version,
            comments: Vec::new(),
        }
    }

    fn conflict(expected: i64) -> DomainError {
        DomainError::VersionConflict {
            id: Id::new(1),
            expected,
        }
    }

    #[tokio::test]
    async fn test_first_attempt_succeeds() {
        let mut repo = MockPostRepository::new();
        repo.expect_get_by_id()
            .times(1)
            .returning(|_| Ok(post_at(0)));
        repo.expect_update()
            .times(1)
            .withf(|p: &Post| p.version == 0 && p.title == "edited")
            .returning(|p| {
                let mut stored = p.clone();
                stored.version += 1;
                Ok(stored)
            });

        let updated = retry_on_conflict(&repo, Id::new(1), 3, |p| {
            p.title = "edited".to_string();
        })
        .await
        .unwrap();

        assert_eq!(updated.version, 1);
        assert_eq!(updated.title, "edited");
    }

    #[tokio::test]
    async fn test_conflict_rereads_and_reapplies() {
        let mut repo = MockPostRepository::new();
        let mut seq = Sequence::new();

        repo.expect_get_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(post_at(0)));
        repo.expect_update()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(conflict(0)));
        repo.expect_get_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(post_at(1)));
        repo.expect_update()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|p: &Post| p.version == 1 && p.content == "again")
            .returning(|p| {
                let mut stored = p.clone();
                stored.version += 1;
                Ok(stored)
            });

        let updated = retry_on_conflict(&repo, Id::new(1), 3, |p| {
            p.content = "again".to_string();
        })
        .await
        .unwrap();

        assert_eq!(updated.version, 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let mut repo = MockPostRepository::new();
        repo.expect_get_by_id()
            .times(2)
            .returning(|_| Ok(post_at(4)));
        repo.expect_update()
            .times(2)
            .returning(|_| Err(conflict(4)));

        let err = retry_on_conflict(&repo, Id::new(1), 2, |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::VersionConflict { expected: 4, .. }));
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let mut repo = MockPostRepository::new();
        repo.expect_get_by_id()
            .times(1)
            .returning(|id| Err(DomainError::PostNotFound(id)));
        repo.expect_update().never();

        let err = retry_on_conflict(&repo, Id::new(1), 5, |_| {})
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }
}
