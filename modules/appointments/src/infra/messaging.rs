use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use tracing::instrument;
use url::Url;

use crate::contract::model::{Appointment, Beautician, Offering};
use crate::domain::ports::ConfirmationSender;

/// HTTP adapter for the messaging collaborator: posts booking confirmations
/// to the notifications service, which resolves the client's contact details
/// and renders the actual email.
pub struct HttpConfirmationSender {
    client: reqwest::Client,
    notify_base: Url,
}

impl HttpConfirmationSender {
    pub fn new(client: reqwest::Client, notify_base: Url) -> Self {
        Self {
            client,
            notify_base,
        }
    }
}

#[async_trait]
impl ConfirmationSender for HttpConfirmationSender {
    #[instrument(
        name = "appointments.http.notifications.confirmation",
        skip_all,
        fields(notify_base = %self.notify_base, appointment_id = %appointment.id)
    )]
    async fn send_confirmation(
        &self,
        appointment: &Appointment,
        beautician: &Beautician,
        offering: &Offering,
    ) -> anyhow::Result<()> {
        let mut url = self.notify_base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("invalid notifications base URL"))?
            .extend(&["api", "appointment-confirmation"]);

        let payload = serde_json::json!({
            "appointmentId": appointment.id,
            "clientId": appointment.client_id,
            "serviceName": offering.name,
            "beauticianName": beautician.name,
            "date": appointment.date,
            "timeSlot": appointment.time_slot,
            "price": appointment.price,
        });

        let response = self
            .client
            .post(url.as_str())
            .json(&payload)
            .send()
            .await
            .context("POST /api/appointment-confirmation")?;

        if !response.status().is_success() {
            bail!("HTTP {}", response.status());
        }
        Ok(())
    }
}
