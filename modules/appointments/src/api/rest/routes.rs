use std::sync::Arc;

use axum::{
    routing::{get, put},
    Extension, Router,
};
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers, problem};
use crate::domain::service::Service;

/// REST surface of the scheduling module. Static segments are registered
/// alongside the `{id}` capture; axum resolves them by specificity.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/appointments/availability", get(handlers::available_slots))
        .route("/appointments/my-appointments", get(handlers::my_appointments))
        .route(
            "/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route("/appointments/{id}", get(handlers::get_appointment))
        .route("/appointments/{id}/status", put(handlers::change_status))
        .route("/appointments/{id}/cancel", put(handlers::cancel_appointment))
        .layer(Extension(service))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::available_slots,
        handlers::my_appointments,
        handlers::list_appointments,
        handlers::get_appointment,
        handlers::create_appointment,
        handlers::change_status,
        handlers::cancel_appointment,
    ),
    components(schemas(
        dto::AvailableSlotsDto,
        dto::AppointmentDto,
        dto::AppointmentResponse,
        dto::AppointmentListDto,
        dto::MyAppointmentsDto,
        dto::PaginationDto,
        dto::CreateAppointmentReq,
        dto::ChangeStatusReq,
        problem::Problem,
    )),
    tags((name = "appointments", description = "Beauty-salon appointment scheduling"))
)]
pub struct ApiDoc;

/// The module's OpenAPI document, for the server to merge and serve.
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
