use axum::http::StatusCode;

use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate.
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    Problem::new(status, title, detail)
        .with_type(format!("https://errors.beautique.example/{}", code))
        .with_code(code)
        .with_instance(instance)
        .into()
}

/// Map a domain error to an RFC 9457 ProblemResponse.
///
/// `Conflict` and `Forbidden` keep their specific detail text: "slot taken",
/// "too late to cancel" and "not your appointment" drive different client
/// remediations.
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::BeauticianNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "APPOINTMENTS_BEAUTICIAN_NOT_FOUND",
            "Beautician not found",
            format!("Beautician {id} was not found"),
            instance,
        ),
        DomainError::ServiceNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "APPOINTMENTS_SERVICE_NOT_FOUND",
            "Service not found",
            format!("Service {id} was not found"),
            instance,
        ),
        DomainError::AppointmentNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "APPOINTMENTS_NOT_FOUND",
            "Appointment not found",
            format!("Appointment {id} was not found"),
            instance,
        ),
        DomainError::SlotTaken { .. } => from_parts(
            StatusCode::CONFLICT,
            "APPOINTMENTS_SLOT_TAKEN",
            "Slot not available",
            format!("{e}"),
            instance,
        ),
        DomainError::CancellationWindowClosed { .. } => from_parts(
            StatusCode::CONFLICT,
            "APPOINTMENTS_CANCEL_WINDOW",
            "Too late to cancel",
            format!("{e}"),
            instance,
        ),
        DomainError::NotAppointmentOwner => from_parts(
            StatusCode::FORBIDDEN,
            "APPOINTMENTS_FORBIDDEN",
            "Forbidden",
            "Not your appointment",
            instance,
        ),
        DomainError::Validation { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "APPOINTMENTS_VALIDATION",
            "Validation error",
            format!("{e}"),
            instance,
        ),
        DomainError::MalformedWorkingHours { .. } => {
            // Log the configuration problem but keep the response generic.
            tracing::error!(error = ?e, "Malformed working hours configuration");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "APPOINTMENTS_WORKING_HOURS",
                "Internal error",
                "Working hours configuration is invalid",
                instance,
            )
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them.
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}

/// Problem for a non-admin caller hitting an admin-only operation.
pub fn admin_only(instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::FORBIDDEN,
        "APPOINTMENTS_ADMIN_ONLY",
        "Forbidden",
        "Administrator role required",
        instance,
    )
}

/// Problem for malformed request input caught at the REST boundary.
pub fn invalid_input(detail: impl Into<String>, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "APPOINTMENTS_VALIDATION",
        "Validation error",
        detail,
        instance,
    )
}
