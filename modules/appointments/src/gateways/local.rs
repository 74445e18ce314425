use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::AppointmentsApi,
    error::AppointmentsError,
    model::{Appointment, AppointmentStatus, DayAvailability, NewAppointment, Requester},
};
use crate::domain::service::Service;

/// Local implementation of the AppointmentsApi trait that delegates to the
/// domain service.
pub struct AppointmentsLocalClient {
    service: Arc<Service>,
}

impl AppointmentsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AppointmentsApi for AppointmentsLocalClient {
    async fn available_slots(
        &self,
        date: NaiveDate,
        beautician_id: Uuid,
        service_id: Option<Uuid>,
    ) -> Result<DayAvailability, AppointmentsError> {
        self.service
            .available_slots(date, beautician_id, service_id)
            .await
            .map_err(Into::into)
    }

    async fn book(&self, new: NewAppointment) -> Result<Appointment, AppointmentsError> {
        self.service.book(new).await.map_err(Into::into)
    }

    async fn get_appointment(
        &self,
        id: Uuid,
        requester: Requester,
    ) -> Result<Appointment, AppointmentsError> {
        self.service
            .get_appointment(id, requester)
            .await
            .map_err(Into::into)
    }

    async fn client_appointments(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentsError> {
        self.service
            .client_appointments(client_id)
            .await
            .map_err(Into::into)
    }

    async fn change_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentsError> {
        self.service
            .change_status(id, status)
            .await
            .map_err(Into::into)
    }

    async fn cancel(
        &self,
        id: Uuid,
        requester: Requester,
    ) -> Result<Appointment, AppointmentsError> {
        self.service.cancel(id, requester).await.map_err(Into::into)
    }
}
