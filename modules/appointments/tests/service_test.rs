//! Lifecycle and availability behaviour of the domain service over in-memory
//! fakes with a pinned clock.

mod common;

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use appointments::domain::error::DomainError;
use appointments::domain::events::AppointmentDomainEvent;
use appointments::domain::ports::Clock;
use appointments::domain::repo::AppointmentFilter;
use appointments::domain::service::{Service, ServiceConfig};
use appointments::contract::model::{AppointmentStatus, Requester};

use common::*;

fn client() -> Requester {
    Requester {
        id: CLIENT_ID,
        is_admin: false,
    }
}

fn admin() -> Requester {
    Requester {
        id: ADMIN_ID,
        is_admin: true,
    }
}

fn slot_strings(slots: &[timegrid::SlotTime]) -> Vec<String> {
    slots.iter().map(|s| s.to_string()).collect()
}

// ----------------------------------------------------------- availability

#[tokio::test]
async fn full_working_monday_yields_nine_hourly_slots() {
    let h = harness();
    let availability = h
        .service
        .available_slots(monday(), BEAUTICIAN_ID, None)
        .await
        .unwrap();

    assert_eq!(
        slot_strings(&availability.slots),
        [
            "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00"
        ]
    );
    assert_eq!(availability.note, None);
}

#[tokio::test]
async fn booked_slot_disappears_from_availability() {
    let h = harness();
    h.service
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap();

    let availability = h
        .service
        .available_slots(monday(), BEAUTICIAN_ID, None)
        .await
        .unwrap();

    let slots = slot_strings(&availability.slots);
    assert!(!slots.contains(&"10:00".to_string()));
    assert_eq!(slots.len(), 8);
    assert!(slots.contains(&"09:00".to_string()));
    assert!(slots.contains(&"11:00".to_string()));
}

#[tokio::test]
async fn non_working_day_is_empty_with_note_not_an_error() {
    let h = harness();
    let availability = h
        .service
        .available_slots(sunday(), BEAUTICIAN_ID, None)
        .await
        .unwrap();

    assert!(availability.slots.is_empty());
    let note = availability.note.unwrap();
    assert!(note.contains("sunday"), "note was: {note}");
}

#[tokio::test]
async fn unknown_beautician_is_not_found() {
    let h = harness();
    let err = h
        .service
        .available_slots(monday(), Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BeauticianNotFound { .. }));
}

#[tokio::test]
async fn unresolvable_service_falls_back_to_default_duration() {
    let h = harness();
    let with_unknown = h
        .service
        .available_slots(monday(), BEAUTICIAN_ID, Some(Uuid::new_v4()))
        .await
        .unwrap();
    let with_none = h
        .service
        .available_slots(monday(), BEAUTICIAN_ID, None)
        .await
        .unwrap();

    assert_eq!(with_unknown.slots, with_none.slots);
}

#[tokio::test]
async fn ninety_minute_service_sizes_the_grid() {
    let h = harness();
    let availability = h
        .service
        .available_slots(monday(), BEAUTICIAN_ID, Some(MASSAGE_90))
        .await
        .unwrap();

    assert_eq!(
        slot_strings(&availability.slots),
        ["09:00", "10:30", "12:00", "13:30", "15:00", "16:30"]
    );
}

#[tokio::test]
async fn conflicts_are_interval_overlaps_not_exact_matches() {
    // A 90-minute booking at 10:00 must block the 10:00 *and* 11:00 hourly
    // candidates; exact-string matching would only block 10:00.
    let h = harness();
    h.service
        .book(new_appointment(MASSAGE_90, monday(), "10:00"))
        .await
        .unwrap();

    let availability = h
        .service
        .available_slots(monday(), BEAUTICIAN_ID, None)
        .await
        .unwrap();

    let slots = slot_strings(&availability.slots);
    assert!(!slots.contains(&"10:00".to_string()));
    assert!(!slots.contains(&"11:00".to_string()));
    assert!(slots.contains(&"09:00".to_string()));
    assert!(slots.contains(&"12:00".to_string()));
}

#[tokio::test]
async fn cancelled_appointments_do_not_occupy_slots() {
    let h = harness();
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap();
    h.service
        .cancel(appointment.id, client())
        .await
        .unwrap();

    let availability = h
        .service
        .available_slots(monday(), BEAUTICIAN_ID, None)
        .await
        .unwrap();
    assert!(slot_strings(&availability.slots).contains(&"10:00".to_string()));
}

// ----------------------------------------------------------------- booking

#[tokio::test]
async fn booking_copies_duration_and_price_from_the_service() {
    let h = harness();
    let appointment = h
        .service
        .book(new_appointment(MASSAGE_90, monday(), "09:00"))
        .await
        .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.duration_minutes, 90);
    assert_eq!(appointment.price, offerings()[1].price);
    assert_eq!(appointment.created_at, sunday_noon());
    assert!(!appointment.reminder_sent);
}

#[tokio::test]
async fn double_booking_the_same_slot_conflicts() {
    let h = harness();
    h.service
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap();

    let err = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::SlotTaken { .. }));
    assert_eq!(h.repo.rows().len(), 1);
}

#[tokio::test]
async fn losing_the_insert_race_still_reports_conflict() {
    // The pre-check passes (empty repo view) but the storage layer reports a
    // duplicate key, as it would when a concurrent request won the slot.
    let repo = AlwaysConflictingRepo(InMemoryRepo::default());
    let events = Arc::new(RecordingEvents::default());
    let sender = Arc::new(RecordingSender::default());
    let service = Service::new(
        Arc::new(repo),
        Arc::new(StaticPersonnel(vec![beautician()])),
        Arc::new(StaticCatalog(offerings())),
        sender.clone(),
        events,
        Arc::new(FixedClock::at(sunday_noon())),
        ServiceConfig::default(),
    );

    let err = service
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::SlotTaken { .. }));
    assert_eq!(sender.sent_count(), 0);
}

#[tokio::test]
async fn booking_requires_an_existing_service_and_beautician() {
    let h = harness();

    let mut missing_service = new_appointment(FACIAL_60, monday(), "10:00");
    missing_service.service_id = Uuid::new_v4();
    assert!(matches!(
        h.service.book(missing_service).await.unwrap_err(),
        DomainError::ServiceNotFound { .. }
    ));

    let mut missing_beautician = new_appointment(FACIAL_60, monday(), "10:00");
    missing_beautician.beautician_id = Uuid::new_v4();
    assert!(matches!(
        h.service.book(missing_beautician).await.unwrap_err(),
        DomainError::BeauticianNotFound { .. }
    ));
}

#[tokio::test]
async fn booking_in_the_past_is_rejected() {
    let h = harness();
    // Clock says Sunday noon; Sunday 09:00 already went by.
    let err = h
        .service
        .book(new_appointment(FACIAL_60, sunday(), "09:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { field: "date", .. }));
}

#[tokio::test]
async fn same_day_later_slot_is_bookable() {
    let h = harness();
    h.clock.set(monday().and_hms_opt(8, 0, 0).unwrap());
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap();
    assert_eq!(appointment.date, monday());
}

#[tokio::test]
async fn overlong_notes_are_rejected() {
    let h = harness();
    let mut new = new_appointment(FACIAL_60, monday(), "10:00");
    new.notes = Some("x".repeat(501));
    let err = h.service.book(new).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { field: "notes", .. }));
}

#[tokio::test]
async fn booking_dispatches_confirmation_without_blocking() {
    let h = harness();
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap();

    h.sender.wait_for(1).await;
    assert_eq!(h.sender.sent.lock().unwrap().as_slice(), &[appointment.id]);
}

#[tokio::test]
async fn failed_confirmation_does_not_fail_the_booking() {
    let repo = Arc::new(InMemoryRepo::default());
    let h = harness_with(repo.clone(), Arc::new(RecordingSender::failing()));

    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap();

    h.sender.wait_for(1).await;
    // The row is persisted and stays pending despite the failed send.
    let stored = repo.rows();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, appointment.id);
    assert_eq!(stored[0].status, AppointmentStatus::Pending);
}

#[tokio::test]
async fn booking_publishes_a_booked_event() {
    let h = harness();
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap();

    let events = h.events.0.lock().unwrap();
    assert!(matches!(
        events.as_slice(),
        [AppointmentDomainEvent::Booked { id, .. }] if *id == appointment.id
    ));
}

// ----------------------------------------------------- fetching and listing

#[tokio::test]
async fn only_owner_or_admin_may_fetch_an_appointment() {
    let h = harness();
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap();

    assert!(h.service.get_appointment(appointment.id, client()).await.is_ok());
    assert!(h.service.get_appointment(appointment.id, admin()).await.is_ok());

    let stranger = Requester {
        id: OTHER_CLIENT_ID,
        is_admin: false,
    };
    assert!(matches!(
        h.service
            .get_appointment(appointment.id, stranger)
            .await
            .unwrap_err(),
        DomainError::NotAppointmentOwner
    ));
}

#[tokio::test]
async fn listing_filters_by_status() {
    let h = harness();
    let first = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "09:00"))
        .await
        .unwrap();
    h.service
        .book(new_appointment(FACIAL_60, monday(), "11:00"))
        .await
        .unwrap();
    h.service
        .change_status(first.id, AppointmentStatus::Confirmed)
        .await
        .unwrap();

    let filter = AppointmentFilter {
        status: Some(AppointmentStatus::Confirmed),
        ..Default::default()
    };
    let (items, total) = h.service.list_page(&filter, 1, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, first.id);
}

// ---------------------------------------------------------- status changes

#[tokio::test]
async fn any_status_may_be_written_over_any_other() {
    let h = harness();
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap();

    // Including "backwards" moves: the status graph is deliberately
    // unconstrained for administrators.
    for status in [
        AppointmentStatus::Completed,
        AppointmentStatus::Pending,
        AppointmentStatus::NoShow,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Pending,
    ] {
        let updated = h.service.change_status(appointment.id, status).await.unwrap();
        assert_eq!(updated.status, status);
    }
}

#[tokio::test]
async fn changing_status_of_missing_appointment_is_not_found() {
    let h = harness();
    assert!(matches!(
        h.service
            .change_status(Uuid::new_v4(), AppointmentStatus::Confirmed)
            .await
            .unwrap_err(),
        DomainError::AppointmentNotFound { .. }
    ));
}

// ------------------------------------------------------------- cancellation

#[tokio::test]
async fn owner_can_cancel_outside_the_window() {
    let h = harness();
    // Monday 09:00 appointment, cancelled Monday 06:00: three hours early.
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "09:00"))
        .await
        .unwrap();
    h.clock.set(monday().and_hms_opt(6, 0, 0).unwrap());

    let cancelled = h.service.cancel(appointment.id, client()).await.unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
}

#[tokio::test]
async fn owner_cannot_cancel_within_two_hours() {
    let h = harness();
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "09:00"))
        .await
        .unwrap();
    // 08:15, 45 minutes before the slot.
    h.clock.set(monday().and_hms_opt(8, 15, 0).unwrap());

    let err = h.service.cancel(appointment.id, client()).await.unwrap_err();
    assert!(matches!(err, DomainError::CancellationWindowClosed { .. }));
}

#[tokio::test]
async fn the_window_boundary_is_exactly_two_hours() {
    let h = harness();
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "09:00"))
        .await
        .unwrap();

    // Exactly two hours of lead time still qualifies.
    h.clock.set(monday().and_hms_opt(7, 0, 0).unwrap());
    let cancelled = h.service.cancel(appointment.id, client()).await.unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
}

#[tokio::test]
async fn admin_cancels_regardless_of_remaining_time() {
    let h = harness();
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "09:00"))
        .await
        .unwrap();
    h.clock.set(monday().and_hms_opt(8, 15, 0).unwrap());

    let cancelled = h.service.cancel(appointment.id, admin()).await.unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
}

#[tokio::test]
async fn only_the_owner_may_cancel() {
    let h = harness();
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "09:00"))
        .await
        .unwrap();

    let stranger = Requester {
        id: OTHER_CLIENT_ID,
        is_admin: false,
    };
    assert!(matches!(
        h.service.cancel(appointment.id, stranger).await.unwrap_err(),
        DomainError::NotAppointmentOwner
    ));
}

#[tokio::test]
async fn clients_cannot_cancel_a_settled_appointment() {
    let h = harness();
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "09:00"))
        .await
        .unwrap();
    h.service
        .change_status(appointment.id, AppointmentStatus::Completed)
        .await
        .unwrap();

    let err = h.service.cancel(appointment.id, client()).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { field: "status", .. }));
}

// -------------------------------------------------------- contract client

#[tokio::test]
async fn contract_client_delegates_and_maps_errors() {
    use appointments::contract::client::AppointmentsApi;
    use appointments::contract::error::AppointmentsError;
    use appointments::gateways::local::AppointmentsLocalClient;

    let h = harness();
    let api: Arc<dyn AppointmentsApi> =
        Arc::new(AppointmentsLocalClient::new(Arc::new(h.service.clone())));

    let booked = api
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap();

    let err = api
        .book(new_appointment(FACIAL_60, monday(), "10:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppointmentsError::Conflict { .. }));

    let availability = api
        .available_slots(monday(), BEAUTICIAN_ID, None)
        .await
        .unwrap();
    assert!(!availability.slots.contains(&booked.time_slot));

    let mine = api.client_appointments(CLIENT_ID).await.unwrap();
    assert_eq!(mine.len(), 1);

    let cancelled = api.cancel(booked.id, client()).await.unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
}

#[tokio::test]
async fn cancellation_window_uses_the_slot_time_not_midnight() {
    let h = harness();
    // Appointment late on Monday; at Monday 10:00 there are still >2 hours
    // before a 17:00 slot even though the date itself already started.
    let appointment = h
        .service
        .book(new_appointment(FACIAL_60, monday(), "17:00"))
        .await
        .unwrap();
    h.clock.set(monday().and_hms_opt(10, 0, 0).unwrap());

    let cancelled = h.service.cancel(appointment.id, client()).await.unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    let lead = cancelled.starts_at() - h.clock.now();
    assert!(lead > Duration::hours(2));
}
