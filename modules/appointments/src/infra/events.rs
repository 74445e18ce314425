use tracing::info;

use crate::domain::events::AppointmentDomainEvent;
use crate::domain::ports::EventPublisher;

/// Event publisher that writes domain events to the log. Stands in for a
/// broadcast transport; nothing in the booking flow waits on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventPublisher;

impl EventPublisher<AppointmentDomainEvent> for LogEventPublisher {
    fn publish(&self, event: &AppointmentDomainEvent) {
        match event {
            AppointmentDomainEvent::Booked { id, at } => {
                info!(appointment_id = %id, at = %at, "event: appointment booked");
            }
            AppointmentDomainEvent::StatusChanged { id, status, at } => {
                info!(appointment_id = %id, status = %status, at = %at, "event: status changed");
            }
            AppointmentDomainEvent::Cancelled { id, at } => {
                info!(appointment_id = %id, at = %at, "event: appointment cancelled");
            }
        }
    }
}
