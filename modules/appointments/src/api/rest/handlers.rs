use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use chrono::NaiveDate;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{
    AppointmentListDto, AppointmentResponse, AvailabilityQuery, AvailableSlotsDto,
    ChangeStatusReq, CreateAppointmentReq, ListQuery, MyAppointmentsDto, PaginationDto,
};
use crate::api::rest::error::{admin_only, invalid_input, map_domain_error};
use crate::api::rest::identity::Identity;
use crate::api::rest::problem::ProblemResponse;
use crate::contract::model::{AppointmentStatus, NewAppointment};
use crate::domain::repo::AppointmentFilter;
use crate::domain::service::Service;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_PAGE_SIZE: u64 = 10;

fn parse_date(raw: &str, instance: &str) -> Result<NaiveDate, ProblemResponse> {
    raw.parse().map_err(|_| {
        invalid_input(
            format!("date '{raw}' is not a valid calendar date (expected YYYY-MM-DD)"),
            instance,
        )
    })
}

fn parse_status(raw: &str, instance: &str) -> Result<AppointmentStatus, ProblemResponse> {
    raw.parse()
        .map_err(|e: String| invalid_input(e, instance))
}

/// Bookable time slots for a beautician on a date.
#[utoipa::path(
    get,
    path = "/appointments/availability",
    tag = "appointments",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Bookable slots", body = AvailableSlotsDto),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Internal Server Error"),
    )
)]
pub async fn available_slots(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Query(query): Query<AvailabilityQuery>,
    uri: Uri,
) -> Result<Json<AvailableSlotsDto>, ProblemResponse> {
    let (Some(raw_date), Some(beautician_id)) = (query.date.as_deref(), query.beautician_id)
    else {
        return Err(invalid_input(
            "date and beauticianId are required",
            uri.path(),
        ));
    };
    let date = parse_date(raw_date, uri.path())?;

    match svc
        .available_slots(date, beautician_id, query.service_id)
        .await
    {
        Ok(availability) => Ok(Json(availability.into())),
        Err(e) => {
            error!("Failed to compute availability: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// The caller's own appointments, newest date first.
#[utoipa::path(
    get,
    path = "/appointments/my-appointments",
    tag = "appointments",
    responses(
        (status = 200, description = "The caller's appointments", body = MyAppointmentsDto),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal Server Error"),
    )
)]
pub async fn my_appointments(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    identity: Identity,
    uri: Uri,
) -> Result<Json<MyAppointmentsDto>, ProblemResponse> {
    match svc.client_appointments(identity.user_id).await {
        Ok(appointments) => Ok(Json(MyAppointmentsDto {
            success: true,
            count: appointments.len(),
            data: appointments.into_iter().map(Into::into).collect(),
        })),
        Err(e) => {
            error!("Failed to list caller appointments: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Administrative listing, filterable and paginated.
#[utoipa::path(
    get,
    path = "/appointments",
    tag = "appointments",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of appointments", body = AppointmentListDto),
        (status = 400, description = "Bad Request"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal Server Error"),
    )
)]
pub async fn list_appointments(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    identity: Identity,
    Query(query): Query<ListQuery>,
    uri: Uri,
) -> Result<Json<AppointmentListDto>, ProblemResponse> {
    if !identity.is_admin {
        return Err(admin_only(uri.path()));
    }

    let mut filter = AppointmentFilter {
        beautician_id: query.beautician,
        ..Default::default()
    };
    if let Some(raw) = &query.status {
        filter.status = Some(parse_status(raw, uri.path())?);
    }
    if let Some(raw) = &query.date {
        filter.date = Some(parse_date(raw, uri.path())?);
    }

    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    match svc.list_page(&filter, page, limit).await {
        Ok((appointments, total)) => Ok(Json(AppointmentListDto {
            success: true,
            count: appointments.len(),
            total,
            pagination: PaginationDto {
                page,
                pages: total.div_ceil(limit),
            },
            data: appointments.into_iter().map(Into::into).collect(),
        })),
        Err(e) => {
            error!("Failed to list appointments: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// One appointment; owner or administrator only.
#[utoipa::path(
    get,
    path = "/appointments/{id}",
    tag = "appointments",
    params(("id" = Uuid, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "The appointment", body = AppointmentResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Internal Server Error"),
    )
)]
pub async fn get_appointment(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    identity: Identity,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<AppointmentResponse>, ProblemResponse> {
    match svc.get_appointment(id, identity.requester()).await {
        Ok(appointment) => Ok(Json(AppointmentResponse::new(appointment))),
        Err(e) => {
            error!("Failed to get appointment {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Book an appointment for the caller.
#[utoipa::path(
    post,
    path = "/appointments",
    tag = "appointments",
    request_body = CreateAppointmentReq,
    responses(
        (status = 201, description = "Booked appointment", body = AppointmentResponse),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Conflict"),
        (status = 500, description = "Internal Server Error"),
    )
)]
pub async fn create_appointment(
    uri: Uri,
    Extension(svc): Extension<std::sync::Arc<Service>>,
    identity: Identity,
    Json(req_body): Json<CreateAppointmentReq>,
) -> Result<(StatusCode, Json<AppointmentResponse>), ProblemResponse> {
    info!("Creating appointment: {:?}", req_body);

    let date = parse_date(&req_body.date, uri.path())?;
    let time_slot = req_body.time_slot.parse().map_err(|_| {
        invalid_input(
            format!(
                "timeSlot '{}' does not match the HH:MM pattern",
                req_body.time_slot
            ),
            uri.path(),
        )
    })?;

    let new = NewAppointment {
        client_id: identity.user_id,
        service_id: req_body.service_id,
        beautician_id: req_body.beautician_id,
        date,
        time_slot,
        notes: req_body.notes,
        client_notes: req_body.client_notes,
    };

    match svc.book(new).await {
        Ok(appointment) => Ok((
            StatusCode::CREATED,
            Json(AppointmentResponse::with_message(
                appointment,
                "Appointment booked; a confirmation email is on its way",
            )),
        )),
        Err(e) => {
            error!("Failed to create appointment: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Administrative status override.
#[utoipa::path(
    put,
    path = "/appointments/{id}/status",
    tag = "appointments",
    params(("id" = Uuid, Path, description = "Appointment id")),
    request_body = ChangeStatusReq,
    responses(
        (status = 200, description = "Updated appointment", body = AppointmentResponse),
        (status = 400, description = "Bad Request"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Internal Server Error"),
    )
)]
pub async fn change_status(
    uri: Uri,
    Extension(svc): Extension<std::sync::Arc<Service>>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(req_body): Json<ChangeStatusReq>,
) -> Result<Json<AppointmentResponse>, ProblemResponse> {
    if !identity.is_admin {
        return Err(admin_only(uri.path()));
    }
    let status = parse_status(&req_body.status, uri.path())?;

    match svc.change_status(id, status).await {
        Ok(appointment) => Ok(Json(AppointmentResponse::with_message(
            appointment,
            format!("Appointment {status}"),
        ))),
        Err(e) => {
            error!("Failed to change status of {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Cancel an appointment (owner within the cancellation window, or admin).
#[utoipa::path(
    put,
    path = "/appointments/{id}/cancel",
    tag = "appointments",
    params(("id" = Uuid, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Cancelled appointment", body = AppointmentResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Conflict"),
        (status = 500, description = "Internal Server Error"),
    )
)]
pub async fn cancel_appointment(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    identity: Identity,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<AppointmentResponse>, ProblemResponse> {
    info!("Cancelling appointment: {}", id);

    match svc.cancel(id, identity.requester()).await {
        Ok(appointment) => Ok(Json(AppointmentResponse::with_message(
            appointment,
            "Appointment cancelled",
        ))),
        Err(e) => {
            error!("Failed to cancel appointment {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
