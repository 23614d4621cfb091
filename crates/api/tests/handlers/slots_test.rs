use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{TestRequest, TestServer};
use eyre::eyre;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use slotbook_core::errors::BookingError;
use slotbook_core::models::appointment::AppointmentStatus;
use slotbook_core::models::time_slot::TimeSlot;
use slotbook_db::mock::store::MockStore;
use uuid::Uuid;

use crate::test_utils::{TestContext, build_server, utc};

fn slots_request(server: &TestServer, doctor_id: &str, start_date: &str, end_date: &str) -> TestRequest {
    server
        .get("/api/slots")
        .add_query_param("doctor_id", doctor_id)
        .add_query_param("start_date", start_date)
        .add_query_param("end_date", end_date)
}

#[tokio::test]
async fn test_list_slots_for_monday() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = slots_request(&server, &ctx.doctor_id.to_string(), "2024-07-15", "2024-07-15")
        .await;

    response.assert_status(StatusCode::OK);
    let slots = response.json::<Vec<TimeSlot>>();
    let starts: Vec<_> = slots.iter().map(|slot| slot.start_time).collect();
    assert_eq!(
        starts,
        vec![
            utc(2024, 7, 15, 9, 0),
            utc(2024, 7, 15, 9, 30),
            utc(2024, 7, 15, 10, 0),
            utc(2024, 7, 15, 10, 30),
            utc(2024, 7, 15, 11, 0),
            utc(2024, 7, 15, 11, 30),
        ]
    );
    assert!(slots.iter().all(|slot| slot.available));
}

#[tokio::test]
async fn test_list_slots_skips_booked_window() {
    let ctx = TestContext::new();
    ctx.add_appointment(
        utc(2024, 7, 15, 10, 0),
        utc(2024, 7, 15, 10, 30),
        AppointmentStatus::Confirmed,
    );
    ctx.add_appointment(
        utc(2024, 7, 15, 11, 0),
        utc(2024, 7, 15, 11, 30),
        AppointmentStatus::Cancelled,
    );
    let server = ctx.server();

    let response = slots_request(&server, &ctx.doctor_id.to_string(), "2024-07-15", "2024-07-15")
        .await;

    response.assert_status(StatusCode::OK);
    let slots = response.json::<Vec<TimeSlot>>();
    assert_eq!(slots.len(), 5);
    assert!(
        slots
            .iter()
            .all(|slot| slot.start_time != utc(2024, 7, 15, 10, 0))
    );
}

#[tokio::test]
async fn test_unknown_doctor_has_no_slots() {
    let server = TestContext::new().server();

    let response = slots_request(&server, &Uuid::new_v4().to_string(), "2024-07-15", "2024-07-21")
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Vec<TimeSlot>>(), vec![]);
}

#[rstest]
#[case::bad_doctor_id("not-a-uuid", "2024-07-15", "2024-07-15")]
#[case::bad_start_date("", "15/07/2024", "2024-07-15")]
#[case::bad_end_date("", "2024-07-15", "2024-02-30")]
#[case::end_before_start("", "2024-07-16", "2024-07-15")]
#[case::range_too_long("", "2024-07-01", "2024-08-15")]
#[tokio::test]
async fn test_invalid_slot_query_is_bad_request(
    #[case] doctor_id: &str,
    #[case] start_date: &str,
    #[case] end_date: &str,
) {
    let ctx = TestContext::new();
    let server = ctx.server();
    let doctor_id = if doctor_id.is_empty() {
        ctx.doctor_id.to_string()
    } else {
        doctor_id.to_string()
    };

    let response = slots_request(&server, &doctor_id, start_date, end_date)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_missing_query_parameter_is_bad_request() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/api/slots")
        .add_query_param("doctor_id", ctx.doctor_id)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_failure_is_internal_error_without_detail() {
    let mut store = MockStore::new();
    store
        .expect_availability_rules()
        .returning(|_| Err(BookingError::Database(eyre!("connection reset by peer"))));
    let server = build_server(Arc::new(store));

    let response = slots_request(&server, &Uuid::new_v4().to_string(), "2024-07-15", "2024-07-15")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"],
        "Internal server error"
    );
}
