use chrono::{NaiveDate, Utc};
use courtside_core::{
    errors::CourtsideError,
    models::{
        availability::Slot,
        datetime::parse_datetime,
        reservation::{
            CreateReservationRequest, PatchReservationRequest, Reservation, ReservationStatus,
        },
        user::{Actor, RegisterRequest, Role},
    },
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::{from_str, json, to_value};
use uuid::Uuid;

#[test]
fn test_create_request_accepts_both_datetime_styles() {
    let court_id = Uuid::new_v4();
    let body = json!({
        "court_id": court_id,
        "start_datetime": "2026-03-14 09:00:00",
        "end_datetime": "2026-03-14T10:00",
    });

    let request: CreateReservationRequest =
        serde_json::from_value(body).expect("Failed to deserialize reservation request");

    let day = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
    assert_eq!(request.court_id, court_id);
    assert_eq!(request.start_datetime, day.and_hms_opt(9, 0, 0).unwrap());
    assert_eq!(request.end_datetime, day.and_hms_opt(10, 0, 0).unwrap());
}

#[test]
fn test_create_request_rejects_garbage_datetime() {
    let body = format!(
        r#"{{"court_id":"{}","start_datetime":"tomorrow","end_datetime":"2026-03-14 10:00:00"}}"#,
        Uuid::new_v4()
    );

    assert!(from_str::<CreateReservationRequest>(&body).is_err());
}

#[test]
fn test_reservation_serializes_wall_clock_times() {
    let day = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
    let reservation = Reservation {
        id: Uuid::new_v4(),
        court_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        start_datetime: day.and_hms_opt(18, 0, 0).unwrap(),
        end_datetime: day.and_hms_opt(19, 30, 0).unwrap(),
        status: ReservationStatus::Pending,
        total_price: Decimal::new(7500, 2),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let value = to_value(&reservation).expect("Failed to serialize reservation");

    assert_eq!(value["start_datetime"], "2026-03-14 18:00:00");
    assert_eq!(value["end_datetime"], "2026-03-14 19:30:00");
    assert_eq!(value["status"], "pending");
    assert_eq!(value["total_price"], "75.00");
}

#[test]
fn test_slot_serialization() {
    let day = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
    let slot = Slot {
        court_id: Uuid::new_v4(),
        start: day.and_hms_opt(8, 0, 0).unwrap(),
        end: day.and_hms_opt(9, 0, 0).unwrap(),
        price: Decimal::new(5000, 2),
    };

    let value = to_value(&slot).expect("Failed to serialize slot");

    assert_eq!(value["start"], "2026-03-14 08:00:00");
    assert_eq!(value["end"], "2026-03-14 09:00:00");
    assert_eq!(value["price"], "50.00");
}

#[test]
fn test_patch_request_fields_are_optional() {
    let patch: PatchReservationRequest =
        from_str(r#"{"status":"cancelled"}"#).expect("Failed to deserialize patch");

    assert_eq!(patch.status, Some(ReservationStatus::Cancelled));
    assert!(!patch.moves_reservation());
    assert!(!patch.is_empty());

    let empty: PatchReservationRequest = from_str("{}").expect("Failed to deserialize patch");
    assert!(empty.is_empty());

    let moved: PatchReservationRequest =
        from_str(r#"{"end_datetime":"2026-03-14 11:00:00"}"#).expect("Failed to deserialize patch");
    assert!(moved.moves_reservation());
    assert_eq!(moved.end_datetime, parse_datetime("2026-03-14 11:00:00"));
}

#[rstest]
#[case("pending", ReservationStatus::Pending)]
#[case("CREATED", ReservationStatus::Pending)]
#[case("confirmed", ReservationStatus::Confirmed)]
#[case("CONFIRMED", ReservationStatus::Confirmed)]
#[case("cancelled", ReservationStatus::Cancelled)]
#[case("CANCELED", ReservationStatus::Cancelled)]
fn test_status_parses_legacy_spellings(#[case] raw: &str, #[case] expected: ReservationStatus) {
    assert_eq!(raw.parse::<ReservationStatus>().unwrap(), expected);
}

#[test]
fn test_status_transitions() {
    use ReservationStatus::*;

    assert!(Pending.can_transition_to(Confirmed));
    assert!(Pending.can_transition_to(Cancelled));
    assert!(Confirmed.can_transition_to(Cancelled));
    assert!(!Confirmed.can_transition_to(Pending));
    assert!(!Cancelled.can_transition_to(Pending));
    assert!(!Cancelled.can_transition_to(Confirmed));
    assert!(!Cancelled.is_active());
    assert!(Pending.is_active() && Confirmed.is_active());
}

#[test]
fn test_actor_can_manage() {
    let owner = Uuid::new_v4();
    let user = Actor { user_id: owner, role: Role::User };
    let stranger = Actor { user_id: Uuid::new_v4(), role: Role::User };
    let admin = Actor { user_id: Uuid::new_v4(), role: Role::Admin };

    assert!(user.can_manage(owner));
    assert!(!stranger.can_manage(owner));
    assert!(admin.can_manage(owner));
}

#[rstest]
#[case("", "a@b.com", "password123")]
#[case("Ana", "", "password123")]
#[case("Ana", "a@b.com", "")]
#[case("Ana", "not-an-email", "password123")]
#[case("Ana", "a@b@c.com", "password123")]
#[case("Ana", "ana@localhost", "password123")]
#[case("Ana", "ana@example.com", "short")]
fn test_register_request_rejected(
    #[case] name: &str,
    #[case] email: &str,
    #[case] password: &str,
) {
    let request = RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };

    match request.validated() {
        Err(CourtsideError::Validation(_)) => {}
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}

#[test]
fn test_register_request_normalizes_fields() {
    let request = RegisterRequest {
        name: "  Ana Souza ".to_string(),
        email: " Ana@Example.COM ".to_string(),
        password: "Password123!".to_string(),
    }
    .validated()
    .expect("request should be valid");

    assert_eq!(request.name, "Ana Souza");
    assert_eq!(request.email, "ana@example.com");
}
