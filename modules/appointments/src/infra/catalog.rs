use anyhow::Context;
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, EntityTrait};
use uuid::Uuid;

use crate::contract::model::Offering;
use crate::domain::ports::ServiceCatalog;
use crate::infra::storage::entity::offering::Entity as OfferingEntity;

/// Read-only SeaORM adapter for the catalog collaborator.
pub struct SeaOrmServiceCatalog<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmServiceCatalog<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> ServiceCatalog for SeaOrmServiceCatalog<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Offering>> {
        let found = OfferingEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("service lookup failed")?;
        found
            .map(|row| {
                Ok(Offering {
                    id: row.id,
                    name: row.name,
                    duration_minutes: row
                        .duration_minutes
                        .try_into()
                        .context("stored service duration is out of range")?,
                    price: row.price,
                    active: row.active,
                })
            })
            .transpose()
    }
}
