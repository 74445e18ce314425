use async_trait::async_trait;

use crate::contract::model::{Appointment, Beautician, Offering};

/// Outbound port onto the messaging collaborator. The booking flow dispatches
/// the confirmation on a detached task and only logs the outcome; a failure
/// here must never fail or roll back the booking. Client contact details are
/// resolved by the collaborator from `appointment.client_id`.
#[async_trait]
pub trait ConfirmationSender: Send + Sync {
    async fn send_confirmation(
        &self,
        appointment: &Appointment,
        beautician: &Beautician,
        offering: &Offering,
    ) -> anyhow::Result<()>;
}
