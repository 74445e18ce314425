use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::contract::model::AppointmentStatus;

/// Transport-agnostic domain event.
#[derive(Debug, Clone)]
pub enum AppointmentDomainEvent {
    Booked {
        id: Uuid,
        at: NaiveDateTime,
    },
    StatusChanged {
        id: Uuid,
        status: AppointmentStatus,
        at: NaiveDateTime,
    },
    Cancelled {
        id: Uuid,
        at: NaiveDateTime,
    },
}
