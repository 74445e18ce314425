use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::Offering;

/// Read-only port onto the catalog collaborator: the salon services whose
/// duration and price get copied onto appointments at booking time.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Offering>>;
}
