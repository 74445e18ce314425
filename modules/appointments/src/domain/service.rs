use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{
    Appointment, AppointmentStatus, DayAvailability, NewAppointment, Requester,
};
use crate::domain::availability::{occupied, AvailabilityCalculator};
use crate::domain::error::DomainError;
use crate::domain::events::AppointmentDomainEvent;
use crate::domain::ports::{
    Clock, ConfirmationSender, EventPublisher, PersonnelDirectory, ServiceCatalog,
};
use crate::domain::repo::{AppointmentFilter, AppointmentsRepository, InsertOutcome};

const NOTES_MAX_CHARS: usize = 500;
const DURATION_MIN_MINUTES: u16 = 15;
const DURATION_MAX_MINUTES: u16 = 180;

/// Configuration for the domain service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Slot duration used when no service is given or it does not resolve.
    pub default_slot_minutes: u16,
    /// Minimum lead time a non-admin client must respect to cancel.
    pub min_cancel_lead_hours: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_slot_minutes: 60,
            min_cancel_lead_hours: 2,
        }
    }
}

/// Appointment lifecycle manager: owns creation, status transitions and
/// cancellation, and enforces the uniqueness and temporal invariants.
/// Depends only on the ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn AppointmentsRepository>,
    personnel: Arc<dyn PersonnelDirectory>,
    catalog: Arc<dyn ServiceCatalog>,
    confirmations: Arc<dyn ConfirmationSender>,
    events: Arc<dyn EventPublisher<AppointmentDomainEvent>>,
    clock: Arc<dyn Clock>,
    availability: AvailabilityCalculator,
    config: ServiceConfig,
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        repo: Arc<dyn AppointmentsRepository>,
        personnel: Arc<dyn PersonnelDirectory>,
        catalog: Arc<dyn ServiceCatalog>,
        confirmations: Arc<dyn ConfirmationSender>,
        events: Arc<dyn EventPublisher<AppointmentDomainEvent>>,
        clock: Arc<dyn Clock>,
        config: ServiceConfig,
    ) -> Self {
        let availability = AvailabilityCalculator::new(
            Arc::clone(&repo),
            Arc::clone(&personnel),
            Arc::clone(&catalog),
            config.default_slot_minutes,
        );
        Self {
            repo,
            personnel,
            catalog,
            confirmations,
            events,
            clock,
            availability,
            config,
        }
    }

    /// Bookable slots for a beautician on a date (delegates to the
    /// availability calculator).
    pub async fn available_slots(
        &self,
        date: NaiveDate,
        beautician_id: Uuid,
        service_id: Option<Uuid>,
    ) -> Result<DayAvailability, DomainError> {
        self.availability
            .available_slots(date, beautician_id, service_id)
            .await
    }

    #[instrument(
        name = "appointments.service.book",
        skip(self, new),
        fields(
            client_id = %new.client_id,
            beautician_id = %new.beautician_id,
            date = %new.date,
            time_slot = %new.time_slot
        )
    )]
    pub async fn book(&self, new: NewAppointment) -> Result<Appointment, DomainError> {
        info!("Booking new appointment");

        self.validate_notes(&new)?;

        let offering = self
            .catalog
            .find_by_id(new.service_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::service_not_found(new.service_id))?;

        let beautician = self
            .personnel
            .find_by_id(new.beautician_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::beautician_not_found(new.beautician_id))?;

        let now = self.clock.now();
        if new.time_slot.on(new.date) <= now {
            return Err(DomainError::validation(
                "date",
                "appointment date must be in the future",
            ));
        }

        if !(DURATION_MIN_MINUTES..=DURATION_MAX_MINUTES).contains(&offering.duration_minutes) {
            return Err(DomainError::validation(
                "duration",
                format!(
                    "service duration {} is outside {DURATION_MIN_MINUTES}..={DURATION_MAX_MINUTES} minutes",
                    offering.duration_minutes
                ),
            ));
        }
        if offering.price.is_sign_negative() {
            return Err(DomainError::validation("price", "price cannot be negative"));
        }

        // Fast-path conflict check for a friendly error. The storage unique
        // index is the actual guarantee; see the SlotTaken translation below.
        let booked = self
            .repo
            .active_on_day(new.beautician_id, new.date)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if occupied(&booked, new.time_slot, offering.duration_minutes) {
            return Err(DomainError::slot_taken(new.date, new.time_slot));
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            client_id: new.client_id,
            service_id: new.service_id,
            beautician_id: new.beautician_id,
            date: new.date,
            time_slot: new.time_slot,
            duration_minutes: offering.duration_minutes,
            price: offering.price,
            status: AppointmentStatus::Pending,
            notes: new.notes,
            client_notes: new.client_notes,
            reminder_sent: false,
            created_at: now,
            updated_at: now,
        };

        match self
            .repo
            .insert(appointment.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            InsertOutcome::Inserted => {}
            InsertOutcome::SlotTaken => {
                // Lost the race between pre-check and insert.
                return Err(DomainError::slot_taken(new.date, new.time_slot));
            }
        }

        self.dispatch_confirmation(&appointment, &beautician, &offering);

        self.events.publish(&AppointmentDomainEvent::Booked {
            id: appointment.id,
            at: appointment.created_at,
        });

        info!(appointment_id = %appointment.id, "Successfully booked appointment");
        Ok(appointment)
    }

    #[instrument(
        name = "appointments.service.get_appointment",
        skip(self),
        fields(appointment_id = %id)
    )]
    pub async fn get_appointment(
        &self,
        id: Uuid,
        requester: Requester,
    ) -> Result<Appointment, DomainError> {
        let appointment = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::appointment_not_found(id))?;

        if !requester.is_admin && appointment.client_id != requester.id {
            return Err(DomainError::NotAppointmentOwner);
        }
        Ok(appointment)
    }

    #[instrument(
        name = "appointments.service.client_appointments",
        skip(self),
        fields(client_id = %client_id)
    )]
    pub async fn client_appointments(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<Appointment>, DomainError> {
        let appointments = self
            .repo
            .list_for_client(client_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        debug!(count = appointments.len(), "listed client appointments");
        Ok(appointments)
    }

    /// Administrative listing: one page plus the total row count.
    #[instrument(name = "appointments.service.list_page", skip(self, filter))]
    pub async fn list_page(
        &self,
        filter: &AppointmentFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Appointment>, u64), DomainError> {
        self.repo
            .list_page(filter, page, per_page)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    /// Administrative status override. Any of the five states may be written
    /// over any other; there is deliberately no transition graph here.
    #[instrument(
        name = "appointments.service.change_status",
        skip(self),
        fields(appointment_id = %id, status = %status)
    )]
    pub async fn change_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, DomainError> {
        info!("Changing appointment status");

        let now = self.clock.now();
        let appointment = self
            .repo
            .update_status(id, status, now)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::appointment_not_found(id))?;

        self.events.publish(&AppointmentDomainEvent::StatusChanged {
            id,
            status,
            at: now,
        });
        Ok(appointment)
    }

    #[instrument(
        name = "appointments.service.cancel",
        skip(self),
        fields(appointment_id = %id, requester_id = %requester.id, admin = requester.is_admin)
    )]
    pub async fn cancel(
        &self,
        id: Uuid,
        requester: Requester,
    ) -> Result<Appointment, DomainError> {
        info!("Cancelling appointment");

        let appointment = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::appointment_not_found(id))?;

        if !requester.is_admin {
            if appointment.client_id != requester.id {
                return Err(DomainError::NotAppointmentOwner);
            }
            if !appointment.status.is_active() {
                return Err(DomainError::validation(
                    "status",
                    format!("cannot cancel a {} appointment", appointment.status),
                ));
            }
            let lead = appointment.starts_at() - self.clock.now();
            if lead < Duration::hours(self.config.min_cancel_lead_hours) {
                return Err(DomainError::cancellation_window_closed(
                    self.config.min_cancel_lead_hours,
                ));
            }
        }

        let now = self.clock.now();
        let cancelled = self
            .repo
            .update_status(id, AppointmentStatus::Cancelled, now)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::appointment_not_found(id))?;

        self.events
            .publish(&AppointmentDomainEvent::Cancelled { id, at: now });

        info!("Successfully cancelled appointment");
        Ok(cancelled)
    }

    // --- helpers ---

    /// Send the confirmation on a detached task: the outcome is logged and
    /// never joined by the booking flow.
    fn dispatch_confirmation(
        &self,
        appointment: &Appointment,
        beautician: &crate::contract::model::Beautician,
        offering: &crate::contract::model::Offering,
    ) {
        let confirmations = Arc::clone(&self.confirmations);
        let appointment = appointment.clone();
        let beautician = beautician.clone();
        let offering = offering.clone();
        tokio::spawn(async move {
            match confirmations
                .send_confirmation(&appointment, &beautician, &offering)
                .await
            {
                Ok(()) => info!(
                    appointment_id = %appointment.id,
                    "appointment confirmation dispatched"
                ),
                Err(e) => warn!(
                    appointment_id = %appointment.id,
                    error = %e,
                    "appointment confirmation failed"
                ),
            }
        });
    }

    fn validate_notes(&self, new: &NewAppointment) -> Result<(), DomainError> {
        if let Some(notes) = &new.notes {
            if notes.chars().count() > NOTES_MAX_CHARS {
                return Err(DomainError::validation(
                    "notes",
                    format!("notes cannot exceed {NOTES_MAX_CHARS} characters"),
                ));
            }
        }
        if let Some(notes) = &new.client_notes {
            if notes.chars().count() > NOTES_MAX_CHARS {
                return Err(DomainError::validation(
                    "clientNotes",
                    format!("notes cannot exceed {NOTES_MAX_CHARS} characters"),
                ));
            }
        }
        Ok(())
    }
}
