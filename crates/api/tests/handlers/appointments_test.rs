use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use slotbook_core::models::appointment::{Appointment, AppointmentStatus};
use slotbook_db::mock::store::MockStore;
use uuid::Uuid;

use crate::test_utils::{TestContext, build_server, utc};

fn booking_body(doctor_id: Uuid, start: &str, end: &str) -> Value {
    json!({
        "doctor_id": doctor_id,
        "patient_id": Uuid::new_v4(),
        "start_time": start,
        "end_time": end,
        "reason": "Follow-up",
    })
}

#[tokio::test]
async fn test_create_appointment() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/appointments")
        .json(&booking_body(
            ctx.doctor_id,
            "2024-07-15T09:00:00Z",
            "2024-07-15T09:30:00Z",
        ))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Appointment>();
    assert_eq!(created.status, AppointmentStatus::Scheduled);
    assert_eq!(created.doctor_id, ctx.doctor_id);
    assert_eq!(created.start_time, utc(2024, 7, 15, 9, 0));
    assert_eq!(created.reason.as_deref(), Some("Follow-up"));
    assert_eq!(ctx.store.appointments_for(ctx.doctor_id), vec![created]);
}

#[tokio::test]
async fn test_booked_slot_disappears_from_listing() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .post("/api/appointments")
        .json(&booking_body(
            ctx.doctor_id,
            "2024-07-15T09:30:00Z",
            "2024-07-15T10:00:00Z",
        ))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/slots")
        .add_query_param("doctor_id", ctx.doctor_id)
        .add_query_param("start_date", "2024-07-15")
        .add_query_param("end_date", "2024-07-15")
        .await;

    let slots = response.json::<Vec<Value>>();
    assert_eq!(slots.len(), 5);
}

#[tokio::test]
async fn test_overlapping_booking_is_conflict() {
    let ctx = TestContext::new();
    ctx.add_appointment(
        utc(2024, 7, 15, 9, 0),
        utc(2024, 7, 15, 9, 30),
        AppointmentStatus::Scheduled,
    );
    let server = ctx.server();

    let response = server
        .post("/api/appointments")
        .json(&booking_body(
            ctx.doctor_id,
            "2024-07-15T09:15:00Z",
            "2024-07-15T09:45:00Z",
        ))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert!(response.json::<Value>()["error"].is_string());
    assert_eq!(ctx.store.appointments_for(ctx.doctor_id).len(), 1);
}

#[tokio::test]
async fn test_unknown_doctor_is_not_found() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/appointments")
        .json(&booking_body(
            Uuid::new_v4(),
            "2024-07-15T09:00:00Z",
            "2024-07-15T09:30:00Z",
        ))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[rstest]
#[case::end_equals_start("2024-07-15T09:00:00Z", "2024-07-15T09:00:00Z")]
#[case::end_before_start("2024-07-15T09:30:00Z", "2024-07-15T09:00:00Z")]
#[case::inside_notice("2024-07-10T09:00:00Z", "2024-07-10T09:30:00Z")]
#[tokio::test]
async fn test_invalid_booking_never_reaches_the_store(#[case] start: &str, #[case] end: &str) {
    let mut store = MockStore::new();
    store.expect_lock_doctor().never();
    let server = build_server(Arc::new(store));

    let response = server
        .post("/api/appointments")
        .json(&booking_body(Uuid::new_v4(), start, end))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/appointments")
        .json(&json!({
            "doctor_id": "not-a-uuid",
            "patient_id": Uuid::new_v4(),
            "start_time": "2024-07-15T09:00:00Z",
            "end_time": "2024-07-15T09:30:00Z",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.store.appointments_for(ctx.doctor_id).is_empty());
}

#[tokio::test]
async fn test_get_appointment() {
    let ctx = TestContext::new();
    let existing = ctx.add_appointment(
        utc(2024, 7, 15, 9, 0),
        utc(2024, 7, 15, 9, 30),
        AppointmentStatus::Scheduled,
    );
    let server = ctx.server();

    let response = server
        .get(&format!("/api/appointments/{}", existing.id))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Appointment>(), existing);
}

#[tokio::test]
async fn test_get_unknown_appointment_is_not_found() {
    let server = TestContext::new().server();

    let response = server
        .get(&format!("/api/appointments/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_appointment_with_bad_id_is_bad_request() {
    let server = TestContext::new().server();

    let response = server.get("/api/appointments/12345").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_status() {
    let ctx = TestContext::new();
    let existing = ctx.add_appointment(
        utc(2024, 7, 15, 9, 0),
        utc(2024, 7, 15, 9, 30),
        AppointmentStatus::Scheduled,
    );
    let server = ctx.server();

    let response = server
        .patch(&format!("/api/appointments/{}/status", existing.id))
        .json(&json!({ "status": "confirmed" }))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json::<Appointment>().status,
        AppointmentStatus::Confirmed
    );
}

#[tokio::test]
async fn test_cancelled_appointment_cannot_be_reactivated() {
    let ctx = TestContext::new();
    let existing = ctx.add_appointment(
        utc(2024, 7, 15, 9, 0),
        utc(2024, 7, 15, 9, 30),
        AppointmentStatus::Cancelled,
    );
    let server = ctx.server();

    let response = server
        .patch(&format!("/api/appointments/{}/status", existing.id))
        .json(&json!({ "status": "scheduled" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        ctx.store.appointments_for(ctx.doctor_id)[0].status,
        AppointmentStatus::Cancelled
    );
}

#[tokio::test]
async fn test_update_status_of_unknown_appointment_is_not_found() {
    let server = TestContext::new().server();

    let response = server
        .patch(&format!("/api/appointments/{}/status", Uuid::new_v4()))
        .json(&json!({ "status": "cancelled" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_to_unknown_status_is_bad_request() {
    let ctx = TestContext::new();
    let existing = ctx.add_appointment(
        utc(2024, 7, 15, 9, 0),
        utc(2024, 7, 15, 9, 30),
        AppointmentStatus::Scheduled,
    );
    let server = ctx.server();

    let response = server
        .patch(&format!("/api/appointments/{}/status", existing.id))
        .json(&json!({ "status": "no_show" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
