use thiserror::Error;
use uuid::Uuid;

/// Errors that are safe to expose to other modules.
///
/// The variants mirror the five error kinds of the scheduling core:
/// validation, not-found, conflict, forbidden, internal. `Conflict` and
/// `Forbidden` carry their message because "slot unavailable", "too late to
/// cancel" and "not your appointment" call for different client-side
/// remediations.
#[derive(Error, Debug, Clone)]
pub enum AppointmentsError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("internal error")]
    Internal,
}

impl AppointmentsError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for AppointmentsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            BeauticianNotFound { id } => Self::not_found("beautician", id),
            ServiceNotFound { id } => Self::not_found("service", id),
            AppointmentNotFound { id } => Self::not_found("appointment", id),
            SlotTaken { date, time_slot } => {
                Self::conflict(format!("slot {time_slot} on {date} is not available"))
            }
            CancellationWindowClosed { min_lead_hours } => Self::conflict(format!(
                "too late to cancel: appointments must be cancelled at least {min_lead_hours} hours in advance"
            )),
            NotAppointmentOwner => Self::forbidden("not your appointment"),
            Validation { field, message } => Self::validation(format!("{field}: {message}")),
            MalformedWorkingHours { .. } | Database { .. } => Self::internal(),
        }
    }
}
