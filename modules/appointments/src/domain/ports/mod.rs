pub mod catalog;
pub mod messaging;
pub mod personnel;

pub use catalog::ServiceCatalog;
pub use messaging::ConfirmationSender;
pub use personnel::PersonnelDirectory;

use chrono::NaiveDateTime;

/// Output port: publish domain events (no knowledge of transport).
pub trait EventPublisher<E>: Send + Sync + 'static {
    fn publish(&self, event: &E);
}

/// Wall-clock source. The scheduling rules (future-date check, cancellation
/// window) compare against this instead of reading the system clock directly
/// so tests can pin "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Production clock: local wall time, matching the single implicit timezone
/// the schedule data lives in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
