use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, instrument};
use uuid::Uuid;

use timegrid::{slots, weekday_key, SlotTime};

use crate::contract::model::{Appointment, DayAvailability};
use crate::domain::error::DomainError;
use crate::domain::ports::{PersonnelDirectory, ServiceCatalog};
use crate::domain::repo::AppointmentsRepository;

/// Availability calculator: the bookable slots of one beautician on one day.
///
/// Pure function of the persisted state at call time — nothing is cached, so
/// a computation right after a booking reflects that booking.
#[derive(Clone)]
pub struct AvailabilityCalculator {
    repo: Arc<dyn AppointmentsRepository>,
    personnel: Arc<dyn PersonnelDirectory>,
    catalog: Arc<dyn ServiceCatalog>,
    default_slot_minutes: u16,
}

impl AvailabilityCalculator {
    pub fn new(
        repo: Arc<dyn AppointmentsRepository>,
        personnel: Arc<dyn PersonnelDirectory>,
        catalog: Arc<dyn ServiceCatalog>,
        default_slot_minutes: u16,
    ) -> Self {
        Self {
            repo,
            personnel,
            catalog,
            default_slot_minutes,
        }
    }

    #[instrument(
        name = "appointments.availability.available_slots",
        skip(self),
        fields(beautician_id = %beautician_id, date = %date)
    )]
    pub async fn available_slots(
        &self,
        date: NaiveDate,
        beautician_id: Uuid,
        service_id: Option<Uuid>,
    ) -> Result<DayAvailability, DomainError> {
        let beautician = self
            .personnel
            .find_by_id(beautician_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::beautician_not_found(beautician_id))?;

        let weekday = weekday_key(date.weekday());
        let hours = beautician.working_hours.day(date.weekday());

        if !hours.available {
            debug!(weekday, "beautician does not work that day");
            return Ok(DayAvailability {
                slots: Vec::new(),
                note: Some(format!("{} does not work on {weekday}", beautician.name)),
            });
        }

        let duration = self.resolve_duration(service_id).await?;

        let start: SlotTime = hours
            .start
            .parse()
            .map_err(|_| DomainError::malformed_working_hours(weekday))?;
        let end: SlotTime = hours
            .end
            .parse()
            .map_err(|_| DomainError::malformed_working_hours(weekday))?;

        let booked = self
            .repo
            .active_on_day(beautician_id, date)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        let free: Vec<SlotTime> = slots(start, end, duration)
            .filter(|candidate| !occupied(&booked, *candidate, duration))
            .collect();

        debug!(slots = free.len(), duration, "computed availability");
        Ok(DayAvailability {
            slots: free,
            note: None,
        })
    }

    /// Slot duration for a computation. A missing or unresolvable service id
    /// silently falls back to the default duration; only the booking path
    /// insists the service exists.
    async fn resolve_duration(&self, service_id: Option<Uuid>) -> Result<u16, DomainError> {
        let Some(id) = service_id else {
            return Ok(self.default_slot_minutes);
        };
        let duration = self
            .catalog
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .map(|offering| offering.duration_minutes)
            .unwrap_or(self.default_slot_minutes);
        Ok(duration)
    }
}

/// Whether a candidate slot of `duration_minutes` collides with any active
/// appointment in `booked`. Conflicts are interval overlaps, not exact
/// start-time matches: a 90-minute booking at 10:00 also blocks a 60-minute
/// candidate at 10:30.
pub(crate) fn occupied(booked: &[Appointment], candidate: SlotTime, duration_minutes: u16) -> bool {
    booked.iter().any(|appointment| {
        appointment.status.is_active()
            && timegrid::overlaps(
                candidate,
                duration_minutes,
                appointment.time_slot,
                appointment.duration_minutes,
            )
    })
}
