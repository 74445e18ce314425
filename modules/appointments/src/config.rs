use serde::{Deserialize, Serialize};

use crate::contract::model::WeekSchedule;

/// Configuration for the appointments module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppointmentsConfig {
    /// Slot duration when no service is given or it does not resolve.
    #[serde(default = "default_slot_minutes")]
    pub default_slot_minutes: u16,
    /// Minimum lead time for non-admin cancellations, in hours.
    #[serde(default = "default_min_cancel_lead_hours")]
    pub min_cancel_lead_hours: i64,
    /// Base URL of the notifications service that sends confirmation emails.
    #[serde(default = "default_notifications_base_url")]
    pub notifications_base_url: String,
    /// Working hours applied to beauticians without a stored schedule.
    #[serde(default = "WeekSchedule::standard_week")]
    pub default_working_hours: WeekSchedule,
}

impl Default for AppointmentsConfig {
    fn default() -> Self {
        Self {
            default_slot_minutes: default_slot_minutes(),
            min_cancel_lead_hours: default_min_cancel_lead_hours(),
            notifications_base_url: default_notifications_base_url(),
            default_working_hours: WeekSchedule::standard_week(),
        }
    }
}

fn default_slot_minutes() -> u16 {
    60
}

fn default_min_cancel_lead_hours() -> i64 {
    2
}

fn default_notifications_base_url() -> String {
    "http://notifications.local".to_string()
}
