//! Shared fakes for service-level tests: an in-memory repository that
//! enforces the active-slot uniqueness rule, fixed clock, static collaborator
//! directories and a recording confirmation sender.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use appointments::contract::model::{
    Appointment, AppointmentStatus, Beautician, NewAppointment, Offering, WeekSchedule,
};
use appointments::domain::events::AppointmentDomainEvent;
use appointments::domain::ports::{
    Clock, ConfirmationSender, EventPublisher, PersonnelDirectory, ServiceCatalog,
};
use appointments::domain::repo::{AppointmentFilter, AppointmentsRepository, InsertOutcome};
use appointments::domain::service::{Service, ServiceConfig};

pub const BEAUTICIAN_ID: Uuid = Uuid::from_u128(0xB0A7);
pub const FACIAL_60: Uuid = Uuid::from_u128(0xFAC1);
pub const MASSAGE_90: Uuid = Uuid::from_u128(0x3A559);
pub const CLIENT_ID: Uuid = Uuid::from_u128(0xC11E);
pub const OTHER_CLIENT_ID: Uuid = Uuid::from_u128(0xC22E);
pub const ADMIN_ID: Uuid = Uuid::from_u128(0xAD31);

/// 2025-06-02 is a Monday.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

pub fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// Default "now": Sunday noon, the day before `monday()`.
pub fn sunday_noon() -> NaiveDateTime {
    sunday().and_hms_opt(12, 0, 0).unwrap()
}

// ---------------------------------------------------------------- repository

#[derive(Default)]
pub struct InMemoryRepo {
    rows: Mutex<Vec<Appointment>>,
}

impl InMemoryRepo {
    pub fn rows(&self) -> Vec<Appointment> {
        self.rows.lock().unwrap().clone()
    }

    /// Seed a row bypassing the service (for listing/cancel setups).
    pub fn seed(&self, appointment: Appointment) {
        self.rows.lock().unwrap().push(appointment);
    }
}

#[async_trait]
impl AppointmentsRepository for InMemoryRepo {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Appointment>> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn active_on_day(
        &self,
        beautician_id: Uuid,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<Appointment>> {
        let mut rows: Vec<Appointment> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| {
                a.beautician_id == beautician_id && a.date == date && a.status.is_active()
            })
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.time_slot);
        Ok(rows)
    }

    async fn insert(&self, appointment: Appointment) -> anyhow::Result<InsertOutcome> {
        let mut rows = self.rows.lock().unwrap();
        // The fake honours the partial unique index on
        // (beautician_id, date, time_slot) over active statuses.
        let duplicate = rows.iter().any(|a| {
            a.beautician_id == appointment.beautician_id
                && a.date == appointment.date
                && a.time_slot == appointment.time_slot
                && a.status.is_active()
        });
        if duplicate {
            return Ok(InsertOutcome::SlotTaken);
        }
        rows.push(appointment);
        Ok(InsertOutcome::Inserted)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
        updated_at: NaiveDateTime,
    ) -> anyhow::Result<Option<Appointment>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        row.status = status;
        row.updated_at = updated_at;
        Ok(Some(row.clone()))
    }

    async fn list_for_client(&self, client_id: Uuid) -> anyhow::Result<Vec<Appointment>> {
        let mut rows: Vec<Appointment> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.client_id == client_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(a.time_slot.cmp(&b.time_slot)));
        Ok(rows)
    }

    async fn list_page(
        &self,
        filter: &AppointmentFilter,
        page: u64,
        per_page: u64,
    ) -> anyhow::Result<(Vec<Appointment>, u64)> {
        let mut rows: Vec<Appointment> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| {
                filter.status.is_none_or(|s| a.status == s)
                    && filter.beautician_id.is_none_or(|b| a.beautician_id == b)
                    && filter.date.is_none_or(|d| a.date == d)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date).then(a.time_slot.cmp(&b.time_slot)));
        let total = rows.len() as u64;
        let start = ((page.max(1) - 1) * per_page) as usize;
        let items = rows.into_iter().skip(start).take(per_page as usize).collect();
        Ok((items, total))
    }
}

/// Repository whose inserts always lose the uniqueness race, regardless of
/// the pre-check outcome.
pub struct AlwaysConflictingRepo(pub InMemoryRepo);

#[async_trait]
impl AppointmentsRepository for AlwaysConflictingRepo {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Appointment>> {
        self.0.find_by_id(id).await
    }
    async fn active_on_day(
        &self,
        beautician_id: Uuid,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<Appointment>> {
        self.0.active_on_day(beautician_id, date).await
    }
    async fn insert(&self, _appointment: Appointment) -> anyhow::Result<InsertOutcome> {
        Ok(InsertOutcome::SlotTaken)
    }
    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
        updated_at: NaiveDateTime,
    ) -> anyhow::Result<Option<Appointment>> {
        self.0.update_status(id, status, updated_at).await
    }
    async fn list_for_client(&self, client_id: Uuid) -> anyhow::Result<Vec<Appointment>> {
        self.0.list_for_client(client_id).await
    }
    async fn list_page(
        &self,
        filter: &AppointmentFilter,
        page: u64,
        per_page: u64,
    ) -> anyhow::Result<(Vec<Appointment>, u64)> {
        self.0.list_page(filter, page, per_page).await
    }
}

// ------------------------------------------------------------- collaborators

pub struct StaticPersonnel(pub Vec<Beautician>);

#[async_trait]
impl PersonnelDirectory for StaticPersonnel {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Beautician>> {
        Ok(self.0.iter().find(|b| b.id == id).cloned())
    }
}

pub struct StaticCatalog(pub Vec<Offering>);

#[async_trait]
impl ServiceCatalog for StaticCatalog {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Offering>> {
        Ok(self.0.iter().find(|o| o.id == id).cloned())
    }
}

/// Records confirmation calls; optionally fails every send.
#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<Uuid>>,
    pub fail: AtomicBool,
}

impl RecordingSender {
    pub fn failing() -> Self {
        let sender = Self::default();
        sender.fail.store(true, Ordering::SeqCst);
        sender
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Wait until `count` confirmations were attempted (the send runs on a
    /// detached task).
    pub async fn wait_for(&self, count: usize) {
        for _ in 0..100 {
            if self.sent_count() >= count {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("expected {count} confirmation attempts, saw {}", self.sent_count());
    }
}

#[async_trait]
impl ConfirmationSender for RecordingSender {
    async fn send_confirmation(
        &self,
        appointment: &Appointment,
        _beautician: &Beautician,
        _offering: &Offering,
    ) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(appointment.id);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("smtp relay unreachable");
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingEvents(pub Mutex<Vec<AppointmentDomainEvent>>);

impl EventPublisher<AppointmentDomainEvent> for RecordingEvents {
    fn publish(&self, event: &AppointmentDomainEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

pub struct FixedClock(pub Mutex<NaiveDateTime>);

impl FixedClock {
    pub fn at(now: NaiveDateTime) -> Self {
        Self(Mutex::new(now))
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.0.lock().unwrap()
    }
}

// ------------------------------------------------------------------ fixtures

pub fn beautician() -> Beautician {
    Beautician {
        id: BEAUTICIAN_ID,
        name: "Amira".to_string(),
        active: true,
        working_hours: WeekSchedule::standard_week(),
    }
}

pub fn offerings() -> Vec<Offering> {
    vec![
        Offering {
            id: FACIAL_60,
            name: "Classic facial".to_string(),
            duration_minutes: 60,
            price: Decimal::new(4500, 2),
            active: true,
        },
        Offering {
            id: MASSAGE_90,
            name: "Deep tissue massage".to_string(),
            duration_minutes: 90,
            price: Decimal::new(7000, 2),
            active: true,
        },
    ]
}

pub fn new_appointment(service_id: Uuid, date: NaiveDate, time_slot: &str) -> NewAppointment {
    NewAppointment {
        client_id: CLIENT_ID,
        service_id,
        beautician_id: BEAUTICIAN_ID,
        date,
        time_slot: time_slot.parse().unwrap(),
        notes: None,
        client_notes: None,
    }
}

/// Everything a service test needs, wired over the fakes.
pub struct Harness {
    pub repo: Arc<InMemoryRepo>,
    pub sender: Arc<RecordingSender>,
    pub events: Arc<RecordingEvents>,
    pub clock: Arc<FixedClock>,
    pub service: Service,
}

pub fn harness() -> Harness {
    harness_with(Arc::new(InMemoryRepo::default()), Arc::new(RecordingSender::default()))
}

pub fn harness_with(
    repo: Arc<InMemoryRepo>,
    sender: Arc<RecordingSender>,
) -> Harness {
    let events = Arc::new(RecordingEvents::default());
    let clock = Arc::new(FixedClock::at(sunday_noon()));
    let service = Service::new(
        repo.clone(),
        Arc::new(StaticPersonnel(vec![beautician()])),
        Arc::new(StaticCatalog(offerings())),
        sender.clone(),
        events.clone(),
        clock.clone(),
        ServiceConfig::default(),
    );
    Harness {
        repo,
        sender,
        events,
        clock,
        service,
    }
}
