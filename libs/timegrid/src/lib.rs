//! Minute-level time-slot arithmetic shared by the booking modules.
//!
//! A slot is identified by its start time within a day (`SlotTime`, a wall
//! clock `HH:MM` value) and a duration in minutes. This crate only does the
//! math: parsing and formatting slot times, generating candidate grids over a
//! working window and testing intervals for overlap. Persistence and policy
//! live with the callers.

mod grid;
mod slot;

pub use grid::{overlaps, slots, SlotGrid};
pub use slot::{SlotTime, SlotTimeParseError};

use chrono::Weekday;

/// Lowercase English key for a weekday, matching the per-weekday entries of a
/// working-hours schedule ("monday" .. "sunday").
pub fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
