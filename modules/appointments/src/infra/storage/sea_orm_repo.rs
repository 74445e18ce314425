//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it can be constructed with a
//! `DatabaseConnection` or a transactional connection.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::contract::model::{Appointment, AppointmentStatus};
use crate::domain::repo::{AppointmentFilter, AppointmentsRepository, InsertOutcome};
use crate::infra::storage::entity::appointment::{
    self, Column, Entity as AppointmentEntity,
};

/// SeaORM repository impl. Holds a connection object; its lifetime/ownership
/// is up to the caller.
pub struct SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> AppointmentsRepository for SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Appointment>> {
        let found = AppointmentEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        found.map(appointment::Model::into_domain).transpose()
    }

    async fn active_on_day(
        &self,
        beautician_id: Uuid,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<Appointment>> {
        let rows = AppointmentEntity::find()
            .filter(Column::BeauticianId.eq(beautician_id))
            .filter(Column::Date.eq(date))
            .filter(Column::Status.is_in(appointment::active_statuses()))
            .order_by_asc(Column::TimeSlot)
            .all(&self.conn)
            .await
            .context("active_on_day failed")?;
        rows.into_iter().map(appointment::Model::into_domain).collect()
    }

    async fn insert(&self, new: Appointment) -> anyhow::Result<InsertOutcome> {
        let m = appointment::from_domain(&new);
        match m.insert(&self.conn).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            // The partial unique index on (beautician_id, date, time_slot)
            // fired: somebody else took the slot since the pre-check.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(InsertOutcome::SlotTaken)
            }
            Err(e) => Err(e).context("insert failed"),
        }
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
        updated_at: NaiveDateTime,
    ) -> anyhow::Result<Option<Appointment>> {
        let Some(found) = AppointmentEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("update_status lookup failed")?
        else {
            return Ok(None);
        };

        let mut active: appointment::ActiveModel = found.into();
        active.status = Set(status.as_str().to_owned());
        active.updated_at = Set(updated_at);
        let updated = active
            .update(&self.conn)
            .await
            .context("update_status failed")?;
        updated.into_domain().map(Some)
    }

    async fn list_for_client(&self, client_id: Uuid) -> anyhow::Result<Vec<Appointment>> {
        let rows = AppointmentEntity::find()
            .filter(Column::ClientId.eq(client_id))
            .order_by_desc(Column::Date)
            .order_by_asc(Column::TimeSlot)
            .all(&self.conn)
            .await
            .context("list_for_client failed")?;
        rows.into_iter().map(appointment::Model::into_domain).collect()
    }

    async fn list_page(
        &self,
        filter: &AppointmentFilter,
        page: u64,
        per_page: u64,
    ) -> anyhow::Result<(Vec<Appointment>, u64)> {
        let mut query = AppointmentEntity::find();
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(beautician_id) = filter.beautician_id {
            query = query.filter(Column::BeauticianId.eq(beautician_id));
        }
        if let Some(date) = filter.date {
            query = query.filter(Column::Date.eq(date));
        }
        let query = query
            .order_by_asc(Column::Date)
            .order_by_asc(Column::TimeSlot);

        let paginator = query.paginate(&self.conn, per_page.max(1));
        let total = paginator.num_items().await.context("count failed")?;
        let rows = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .context("fetch_page failed")?;
        let items = rows
            .into_iter()
            .map(appointment::Model::into_domain)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok((items, total))
    }
}
