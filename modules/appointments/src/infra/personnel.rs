use anyhow::Context;
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, EntityTrait};
use uuid::Uuid;

use crate::contract::model::{Beautician, WeekSchedule};
use crate::domain::ports::PersonnelDirectory;
use crate::infra::storage::entity::beautician::{Entity as BeauticianEntity, Model};

/// Read-only SeaORM adapter for the personnel collaborator.
///
/// Working hours are not a schema-level constant: rows without a stored
/// schedule fall back to the default week injected at construction time.
pub struct SeaOrmPersonnelDirectory<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
    default_hours: WeekSchedule,
}

impl<C> SeaOrmPersonnelDirectory<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C, default_hours: WeekSchedule) -> Self {
        Self {
            conn,
            default_hours,
        }
    }

    fn into_beautician(&self, row: Model) -> anyhow::Result<Beautician> {
        let working_hours = match row.working_hours {
            Some(json) => serde_json::from_value(json)
                .with_context(|| format!("working_hours of beautician {} is malformed", row.id))?,
            None => self.default_hours.clone(),
        };
        Ok(Beautician {
            id: row.id,
            name: row.name,
            active: row.active,
            working_hours,
        })
    }
}

#[async_trait]
impl<C> PersonnelDirectory for SeaOrmPersonnelDirectory<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Beautician>> {
        let found = BeauticianEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("beautician lookup failed")?;
        found.map(|row| self.into_beautician(row)).transpose()
    }
}
