use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::contract::error::AppointmentsError;
use crate::contract::model::{
    Appointment, AppointmentStatus, DayAvailability, NewAppointment, Requester,
};

/// In-process API of the scheduling module for other modules to consume.
#[async_trait]
pub trait AppointmentsApi: Send + Sync {
    /// Bookable slots for a beautician on a date. `service_id` selects the
    /// slot duration; when it is absent or does not resolve, the configured
    /// default duration is used.
    async fn available_slots(
        &self,
        date: NaiveDate,
        beautician_id: Uuid,
        service_id: Option<Uuid>,
    ) -> Result<DayAvailability, AppointmentsError>;

    /// Book a new appointment; re-validates availability before persisting.
    async fn book(&self, new: NewAppointment) -> Result<Appointment, AppointmentsError>;

    /// Fetch one appointment; only its client or an administrator may see it.
    async fn get_appointment(
        &self,
        id: Uuid,
        requester: Requester,
    ) -> Result<Appointment, AppointmentsError>;

    /// All appointments of one client, newest date first.
    async fn client_appointments(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentsError>;

    /// Administrative status override; no transition graph is enforced.
    async fn change_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentsError>;

    /// Cancel an appointment. Clients may only cancel their own, and only
    /// while the cancellation window is open; administrators bypass both.
    async fn cancel(&self, id: Uuid, requester: Requester)
        -> Result<Appointment, AppointmentsError>;
}
