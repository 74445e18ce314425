use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timegrid::SlotTime;
use uuid::Uuid;

/// Lifecycle status of an appointment.
///
/// `Pending` and `Confirmed` are the *active* statuses: only they occupy a
/// slot for conflict purposes. The other three free the slot but keep the
/// record (cancellation is a status change, never a row deletion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    #[serde(rename = "no-show")]
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    /// Whether this status still occupies its time slot.
    pub fn is_active(self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                format!("unknown status '{s}', expected one of pending, confirmed, completed, cancelled, no-show")
            })
    }
}

/// A booked appointment as other modules see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub beautician_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: SlotTime,
    pub duration_minutes: u16,
    pub price: Decimal,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub client_notes: Option<String>,
    pub reminder_sent: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Appointment {
    /// The instant the appointment begins (local wall clock).
    pub fn starts_at(&self) -> NaiveDateTime {
        self.time_slot.on(self.date)
    }
}

/// Input for booking a new appointment. Duration and price are not part of
/// the request: they are copied from the resolved service at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub beautician_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: SlotTime,
    pub notes: Option<String>,
    pub client_notes: Option<String>,
}

/// The authenticated caller, as supplied by the identity collaborator.
/// This module trusts it as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub id: Uuid,
    pub is_admin: bool,
}

/// One weekday of a beautician's working hours. `start`/`end` are kept as the
/// raw `HH:MM` strings the personnel service stores; the availability
/// calculator parses them and reports malformed values as an internal error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub start: String,
    pub end: String,
    pub available: bool,
}

impl DayHours {
    pub fn open(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            available: true,
        }
    }

    pub fn closed() -> Self {
        Self {
            start: "00:00".to_string(),
            end: "00:00".to_string(),
            available: false,
        }
    }
}

/// Per-weekday working hours of a beautician.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl WeekSchedule {
    pub fn day(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    /// The salon's stock week: Mon-Fri 09:00-18:00, Sat 10:00-16:00, Sun off.
    /// Used as the configured fallback for beauticians without a stored
    /// schedule.
    pub fn standard_week() -> Self {
        Self {
            monday: DayHours::open("09:00", "18:00"),
            tuesday: DayHours::open("09:00", "18:00"),
            wednesday: DayHours::open("09:00", "18:00"),
            thursday: DayHours::open("09:00", "18:00"),
            friday: DayHours::open("09:00", "18:00"),
            saturday: DayHours::open("10:00", "16:00"),
            sunday: DayHours::closed(),
        }
    }
}

/// Beautician record as supplied by the personnel collaborator (read-only
/// here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beautician {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    pub working_hours: WeekSchedule,
}

/// Salon service record as supplied by the catalog collaborator (read-only
/// here). Determines an appointment's duration and price at booking time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: u16,
    pub price: Decimal,
    pub active: bool,
}

/// Result of an availability computation: bookable slot start times in
/// chronological order, plus an explanatory note when the list is empty
/// because the beautician does not work that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub slots: Vec<SlotTime>,
    pub note: Option<String>,
}
