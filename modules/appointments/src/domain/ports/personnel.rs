use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::Beautician;

/// Read-only port onto the personnel collaborator: beautician records with
/// their per-weekday working hours. Never mutated by this module.
#[async_trait]
pub trait PersonnelDirectory: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Beautician>>;
}
