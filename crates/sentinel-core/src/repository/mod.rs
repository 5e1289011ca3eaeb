//! Data access layer
//!
//! A generic five-operation CRUD contract plus one repository per entity.
//! Repositories report absence as `Ok(None)` / `Ok(false)`; translating
//! absence into client-facing errors is the service layer's job.

mod notifications;
mod users;


pub use notifications::NotificationRepository;
pub use users::UserRepository;

use async_trait::async_trait;

use crate::error::Result;

/// Uniform CRUD over one entity type.
///
/// `create` returns the persisted row including its generated id and column
/// defaults. `update` is partial: only the patch's `Some` fields overwrite,
/// and an unknown id yields `Ok(None)` without writing. `delete` reports
/// whether a row was actually removed.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Persisted row type
    type Entity;
    /// Insert shape
    type New;
    /// Partial-update shape
    type Patch;

    /// Point lookup by primary key.
    async fn get(&self, id: i64) -> Result<Option<Self::Entity>>;

    /// Full scan in natural storage order.
    async fn get_all(&self) -> Result<Vec<Self::Entity>>;

    /// Insert and return the persisted row.
    async fn create(&self, fields: Self::New) -> Result<Self::Entity>;

    /// Overwrite the supplied fields of row `id`, returning the updated row
    /// or `None` if the id does not exist.
    async fn update(&self, fields: Self::Patch, id: i64) -> Result<Option<Self::Entity>>;

    /// Remove row `id`; true iff a row was removed.
    async fn delete(&self, id: i64) -> Result<bool>;
}
