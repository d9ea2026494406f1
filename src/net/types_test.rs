use super::*;

// =============================================================================
// SessionInformation
// =============================================================================

#[test]
fn session_information_reads_full_login_response() {
    let json = r#"{
        "token": "fake-jwt",
        "type": "Bearer",
        "id": 1,
        "username": "john@doe.com",
        "firstName": "John",
        "lastName": "Doe",
        "admin": false
    }"#;
    let info: SessionInformation = serde_json::from_str(json).unwrap();
    assert_eq!(info.token, "fake-jwt");
    assert_eq!(info.token_type, "Bearer");
    assert_eq!(info.user_id, 1);
    assert_eq!(info.username, "john@doe.com");
    assert_eq!(info.first_name, "John");
    assert_eq!(info.last_name, "Doe");
    assert!(!info.is_admin);
}

#[test]
fn session_information_defaults_missing_profile_fields() {
    let info: SessionInformation = serde_json::from_str(r#"{"id":1,"admin":true,"token":"fake"}"#).unwrap();
    assert_eq!(info.user_id, 1);
    assert!(info.is_admin);
    assert!(info.token_type.is_empty());
    assert!(info.username.is_empty());
}

#[test]
fn session_information_requires_token() {
    assert!(serde_json::from_str::<SessionInformation>(r#"{"id":1,"admin":true}"#).is_err());
}

#[test]
fn session_information_writes_wire_names() {
    let info = SessionInformation {
        token: "t".into(),
        token_type: "Bearer".into(),
        user_id: 7,
        username: "u".into(),
        first_name: "F".into(),
        last_name: "L".into(),
        is_admin: true,
    };
    let value = serde_json::to_value(&info).unwrap();
    assert_eq!(value["type"], "Bearer");
    assert_eq!(value["id"], 7);
    assert_eq!(value["admin"], true);
    assert_eq!(value["firstName"], "F");
}

// =============================================================================
// Requests
// =============================================================================

#[test]
fn register_request_uses_camel_case() {
    let req = RegisterRequest {
        email: "john@doe.com".into(),
        first_name: "John".into(),
        last_name: "Doe".into(),
        password: "test1234".into(),
    };
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["firstName"], "John");
    assert_eq!(value["lastName"], "Doe");
    assert!(value.get("first_name").is_none());
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn session_reads_timestamp_date_and_audit_fields() {
    let json = r#"{
        "id": 1,
        "name": "Morning yoga",
        "date": "2024-01-01T00:00:00.000Z",
        "teacher_id": 1,
        "description": "Relax",
        "users": [2, 3],
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-02T00:00:00.000Z"
    }"#;
    let session: Session = serde_json::from_str(json).unwrap();
    assert_eq!(session.id, Some(1));
    assert_eq!(session.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(session.teacher_id, 1);
    assert_eq!(session.users, vec![2, 3]);
    assert!(session.created_at.is_some());
    assert!(session.updated_at.is_some());
}

#[test]
fn session_reads_bare_date_without_users() {
    let json = r#"{"id":1,"name":"Morning yoga","date":"2024-01-01","teacher_id":1,"description":"Relax"}"#;
    let session: Session = serde_json::from_str(json).unwrap();
    assert_eq!(session.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert!(session.users.is_empty());
}

#[test]
fn session_rejects_garbage_date() {
    let json = r#"{"name":"x","date":"next tuesday","teacher_id":1,"description":"d"}"#;
    let err = serde_json::from_str::<Session>(json).unwrap_err();
    assert!(err.to_string().contains("invalid session date"));
}

#[test]
fn session_body_keeps_snake_case_teacher_and_plain_date() {
    let session = Session {
        id: None,
        name: "Yoga".into(),
        date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        teacher_id: 10,
        description: "Desc".into(),
        users: vec![],
        created_at: None,
        updated_at: None,
    };
    let value = serde_json::to_value(&session).unwrap();
    assert_eq!(value["teacher_id"], 10);
    assert_eq!(value["date"], "2025-01-01");
    assert!(value.get("id").is_none());
    assert!(value.get("createdAt").is_none());
}

#[test]
fn has_participant_checks_membership() {
    let json = r#"{"name":"x","date":"2025-01-01","teacher_id":1,"description":"d","users":[1]}"#;
    let session: Session = serde_json::from_str(json).unwrap();
    assert!(session.has_participant(1));
    assert!(!session.has_participant(2));
}

// =============================================================================
// Display names
// =============================================================================

#[test]
fn display_name_uppercases_last_name() {
    assert_eq!(display_name("John", "Doe"), "John DOE");
}

#[test]
fn teacher_display_name() {
    let teacher: Teacher = serde_json::from_str(r#"{"id":1,"firstName":"Alice","lastName":"Smith"}"#).unwrap();
    assert_eq!(teacher.display_name(), "Alice SMITH");
}

#[test]
fn user_reads_account_payload() {
    let json = r#"{
        "id": 1,
        "firstName": "John",
        "lastName": "Doe",
        "email": "john@doe.com",
        "admin": false,
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-02-01T00:00:00.000Z"
    }"#;
    let user: User = serde_json::from_str(json).unwrap();
    assert_eq!(user.email, "john@doe.com");
    assert_eq!(user.display_name(), "John DOE");
    assert!(!user.admin);
}

// =============================================================================
// parse_session_date
// =============================================================================

#[test]
fn parse_session_date_accepts_offset_timestamps() {
    let date = parse_session_date("2024-03-05T23:30:00-02:00").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
}

#[test]
fn parse_session_date_keeps_senders_calendar_day() {
    assert_eq!(
        parse_session_date("2026-02-13T23:30:00-05:00").unwrap(),
        NaiveDate::from_ymd_opt(2026, 2, 13).unwrap()
    );
    assert_eq!(
        parse_session_date("2026-02-14T00:30:00+09:00").unwrap(),
        NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
    );
}

#[test]
fn parse_session_date_trims_whitespace() {
    assert_eq!(
        parse_session_date(" 2026-02-13 ").unwrap(),
        NaiveDate::from_ymd_opt(2026, 2, 13).unwrap()
    );
}
