use super::*;

fn key() -> BlueprintKey {
    BlueprintKey::new("juan", "plano-1").expect("key")
}

#[test]
fn paths_follow_rest_surface() {
    assert_eq!(author_path("juan"), "/api/blueprints/juan");
    assert_eq!(blueprint_path(&key()), "/api/blueprints/juan/plano-1");
}

#[test]
fn path_segments_are_percent_encoded() {
    let key = BlueprintKey::new("juan", "plano#2").expect("key");
    assert_eq!(blueprint_path(&key), "/api/blueprints/juan/plano%232");

    let key = BlueprintKey::new("ana maría", "casa?v=1&x=50%").expect("key");
    assert_eq!(blueprint_path(&key), "/api/blueprints/ana%20mar%C3%ADa/casa%3Fv%3D1%26x%3D50%25");
    assert_eq!(author_path("ana maría"), "/api/blueprints/ana%20mar%C3%ADa");
}

#[test]
fn unreserved_characters_stay_readable() {
    let key = BlueprintKey::new("juan", "plano-1_v2.(final)!~*'").expect("key");
    assert_eq!(blueprint_path(&key), "/api/blueprints/juan/plano-1_v2.(final)!~*'");
}

#[test]
fn url_joins_without_double_slash() {
    assert_eq!(url("http://localhost:8080/", AUTH_LOGIN), "http://localhost:8080/api/auth/login");
    assert_eq!(url("http://localhost:3001", BLUEPRINTS), "http://localhost:3001/api/blueprints");
}

#[test]
fn bearer_formats_authorization_value() {
    assert_eq!(bearer("abc"), "Bearer abc");
}

#[test]
fn forbidden_listing_is_auth_error() {
    let err = classify_status(Operation::List, 403, None);
    assert!(err.is_auth_error());
    assert_eq!(err.to_string(), AUTH_ERROR);
}

#[test]
fn auth_error_is_distinct_from_network_failure() {
    let auth = classify_status(Operation::List, 401, None);
    let network = ApiError::Network("connection refused".to_owned());
    assert!(auth.is_auth_error());
    assert!(!network.is_auth_error());
    assert_ne!(auth.to_string(), network.to_string());
}

#[test]
fn wrong_password_is_rejected_with_server_message() {
    let err = classify_status(Operation::Login, 401, Some(r#"{"error":"Invalid credentials"}"#));
    assert!(!err.is_auth_error());
    assert_eq!(
        err,
        ApiError::Rejected { status: 401, message: "Invalid credentials".to_owned() }
    );
}

#[test]
fn duplicate_name_surfaces_server_error_text() {
    let err = classify_status(Operation::Create, 409, Some(r#"{"error":"Blueprint already exists"}"#));
    assert_eq!(err.to_string(), "Blueprint already exists");
}

#[test]
fn missing_or_unparseable_body_uses_operation_fallback() {
    assert_eq!(
        classify_status(Operation::Save, 500, Some("<html>oops</html>")).to_string(),
        "Failed to save blueprint"
    );
    assert_eq!(
        classify_status(Operation::Delete, 404, None).to_string(),
        "Failed to delete blueprint"
    );
    assert_eq!(
        classify_status(Operation::Register, 400, Some(r#"{"error":"  "}"#)).to_string(),
        "Registration failed"
    );
}

#[test]
fn success_range_accepts_no_content() {
    assert!(is_success(200));
    assert!(is_success(204));
    assert!(!is_success(304));
    assert!(!is_success(403));
}

#[test]
fn auth_user_message_prompts_sign_in() {
    let err = ApiError::Auth { status: 401 };
    assert!(err.user_message().contains("sign in"));
}
