use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::contract::model::{Appointment, AppointmentStatus};

/// Result of an insert attempt. The storage layer carries a partial unique
/// index on `(beautician_id, date, time_slot)` over active statuses;
/// `SlotTaken` is the translated duplicate-key outcome so concurrent bookings
/// of the same slot cannot both succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    SlotTaken,
}

/// Filters for the administrative listing.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub beautician_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
}

/// Port for the domain layer: persistence operations the scheduling core
/// needs. Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait AppointmentsRepository: Send + Sync {
    /// Load an appointment by id.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Appointment>>;

    /// Active (pending or confirmed) appointments of one beautician on one
    /// day, ordered by slot. One range query serves every candidate-slot
    /// check of an availability computation.
    async fn active_on_day(
        &self,
        beautician_id: Uuid,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<Appointment>>;

    /// Insert a fully-formed appointment.
    ///
    /// The service computes id/timestamps/validation; the repo persists and
    /// reports a uniqueness-constraint violation as `SlotTaken` instead of an
    /// error.
    async fn insert(&self, appointment: Appointment) -> anyhow::Result<InsertOutcome>;

    /// Overwrite the status and bump `updated_at`. Returns the updated row,
    /// or `None` when the id does not exist.
    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
        updated_at: NaiveDateTime,
    ) -> anyhow::Result<Option<Appointment>>;

    /// All appointments of one client, newest date first.
    async fn list_for_client(&self, client_id: Uuid) -> anyhow::Result<Vec<Appointment>>;

    /// One page of the filtered listing ordered by `(date, time_slot)`,
    /// together with the total number of matching rows. `page` is 1-based.
    async fn list_page(
        &self,
        filter: &AppointmentFilter,
        page: u64,
        per_page: u64,
    ) -> anyhow::Result<(Vec<Appointment>, u64)>;
}
