use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::Value;
use slotbook_api::middleware::error_handling::{
    AppError, INTERNAL_ERROR_MESSAGE, handle_middleware_error, map_error,
};
use slotbook_core::errors::BookingError;
use uuid::Uuid;

async fn error_body(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    body["error"].as_str().unwrap().to_string()
}

fn conflict() -> BookingError {
    BookingError::SlotConflict {
        start_time: Utc.with_ymd_and_hms(2024, 7, 15, 9, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2024, 7, 15, 9, 30, 0).unwrap(),
    }
}

#[rstest]
#[case::validation(BookingError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case::doctor_not_found(BookingError::DoctorNotFound(Uuid::nil()), StatusCode::NOT_FOUND)]
#[case::not_found(BookingError::NotFound("Appointment".into()), StatusCode::NOT_FOUND)]
#[case::conflict(conflict(), StatusCode::CONFLICT)]
#[case::database(BookingError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case::internal(
    BookingError::Internal(Box::new(std::io::Error::other("Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_client_errors_carry_their_message() {
    let response = map_error(BookingError::Validation("end_time must be after start_time".into()));

    assert_eq!(
        error_body(response).await,
        "Validation error: end_time must be after start_time"
    );
}

#[tokio::test]
async fn test_internal_errors_hide_their_detail() {
    let response = map_error(BookingError::Database(eyre::eyre!(
        "password authentication failed for user slotbook"
    )));

    assert_eq!(error_body(response).await, INTERNAL_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_request_timeout_is_internal_error() {
    let error = handle_middleware_error(Box::new(tower::timeout::error::Elapsed::new())).await;

    assert!(matches!(error, AppError(BookingError::Internal(_))));
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_body(response).await, INTERNAL_ERROR_MESSAGE);
}
