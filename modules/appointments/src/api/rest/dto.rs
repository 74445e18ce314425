use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::contract::model::{Appointment, DayAvailability};

/// Query parameters of the availability endpoint. `date` stays a raw string
/// (and both required fields optional at the serde level) so missing or
/// unparsable values map to this module's validation problem instead of the
/// extractor's generic rejection.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Calendar date, ISO `YYYY-MM-DD` (required)
    pub date: Option<String>,
    /// Beautician id (required)
    pub beautician_id: Option<Uuid>,
    /// Optional service whose duration sizes the slots
    pub service_id: Option<Uuid>,
}

/// Availability response: bookable `HH:MM` start times in chronological
/// order. `message` explains an empty list on a non-working day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvailableSlotsDto {
    pub success: bool,
    pub data: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<DayAvailability> for AvailableSlotsDto {
    fn from(availability: DayAvailability) -> Self {
        Self {
            success: true,
            data: availability
                .slots
                .into_iter()
                .map(|slot| slot.to_string())
                .collect(),
            message: availability.note,
        }
    }
}

/// REST DTO for appointment representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDto {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub beautician_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: String,
    /// Minutes
    pub duration: u16,
    pub price: Decimal,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_notes: Option<String>,
    pub reminder_sent: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Appointment> for AppointmentDto {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            client_id: appointment.client_id,
            service_id: appointment.service_id,
            beautician_id: appointment.beautician_id,
            date: appointment.date,
            time_slot: appointment.time_slot.to_string(),
            duration: appointment.duration_minutes,
            price: appointment.price,
            status: appointment.status.as_str().to_owned(),
            notes: appointment.notes,
            client_notes: appointment.client_notes,
            reminder_sent: appointment.reminder_sent,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

/// Envelope for single-appointment responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: AppointmentDto,
}

impl AppointmentResponse {
    pub fn new(appointment: Appointment) -> Self {
        Self {
            success: true,
            message: None,
            data: appointment.into(),
        }
    }

    pub fn with_message(appointment: Appointment, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: appointment.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginationDto {
    pub page: u64,
    pub pages: u64,
}

/// Envelope of the administrative listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentListDto {
    pub success: bool,
    pub count: usize,
    pub total: u64,
    pub pagination: PaginationDto,
    pub data: Vec<AppointmentDto>,
}

/// Envelope of the caller's own appointments.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MyAppointmentsDto {
    pub success: bool,
    pub count: usize,
    pub data: Vec<AppointmentDto>,
}

/// REST DTO for booking an appointment. The client id comes from the
/// caller's identity, never from the body. `date` and `timeSlot` stay raw
/// strings for precise validation problems.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentReq {
    pub service_id: Uuid,
    pub beautician_id: Uuid,
    /// Calendar date, ISO `YYYY-MM-DD`
    pub date: String,
    /// Slot start time, `HH:MM`
    pub time_slot: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub client_notes: Option<String>,
}

/// REST DTO for the administrative status override.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangeStatusReq {
    /// One of pending, confirmed, completed, cancelled, no-show
    pub status: String,
}

/// Query parameters of the administrative listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Page size, defaults to 10
    pub limit: Option<u64>,
    /// Filter by status
    pub status: Option<String>,
    /// Filter by beautician id
    pub beautician: Option<Uuid>,
    /// Filter by calendar date, ISO `YYYY-MM-DD`
    pub date: Option<String>,
}
