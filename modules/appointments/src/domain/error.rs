use chrono::NaiveDate;
use thiserror::Error;
use timegrid::SlotTime;
use uuid::Uuid;

/// Domain-level error taxonomy of the scheduling core.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("beautician {id} not found")]
    BeauticianNotFound { id: Uuid },

    #[error("service {id} not found")]
    ServiceNotFound { id: Uuid },

    #[error("appointment {id} not found")]
    AppointmentNotFound { id: Uuid },

    /// The requested slot is occupied by an active appointment — raised both
    /// by the in-service pre-check and by the storage uniqueness constraint.
    #[error("slot {time_slot} on {date} is not available")]
    SlotTaken { date: NaiveDate, time_slot: SlotTime },

    #[error("too late to cancel: less than {min_lead_hours} hours before the appointment")]
    CancellationWindowClosed { min_lead_hours: i64 },

    #[error("not your appointment")]
    NotAppointmentOwner,

    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    /// Working-hours configuration data could not be parsed.
    #[error("working hours for {weekday} are malformed")]
    MalformedWorkingHours { weekday: &'static str },

    #[error("database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn beautician_not_found(id: Uuid) -> Self {
        Self::BeauticianNotFound { id }
    }

    pub fn service_not_found(id: Uuid) -> Self {
        Self::ServiceNotFound { id }
    }

    pub fn appointment_not_found(id: Uuid) -> Self {
        Self::AppointmentNotFound { id }
    }

    pub fn slot_taken(date: NaiveDate, time_slot: SlotTime) -> Self {
        Self::SlotTaken { date, time_slot }
    }

    pub fn cancellation_window_closed(min_lead_hours: i64) -> Self {
        Self::CancellationWindowClosed { min_lead_hours }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn malformed_working_hours(weekday: &'static str) -> Self {
        Self::MalformedWorkingHours { weekday }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
