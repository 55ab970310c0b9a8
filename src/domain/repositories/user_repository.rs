//! Repository trait for user lookups.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to user accounts.
///
/// Users are provisioned elsewhere; the watch list core only resolves them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError>;
}
