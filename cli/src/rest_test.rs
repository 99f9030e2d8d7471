use super::*;

#[test]
fn list_body_decodes_summaries() {
    let body = r#"[{"name":"plano-1","points":[{"x":1,"y":2}]},{"name":"casa","points":[]}]"#;
    let list: Vec<BlueprintSummary> = decode(Operation::List, 200, body).expect("decodes");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].point_count(), 1);
    assert_eq!(list[1].name, "casa");
}

#[test]
fn forbidden_list_is_auth_error_not_network() {
    let err = decode::<Vec<BlueprintSummary>>(Operation::List, 403, "").expect_err("rejected");
    assert!(err.is_auth_error());
    assert!(!matches!(err, ApiError::Network(_)));
}

#[test]
fn rejected_login_carries_server_error() {
    let err = decode::<AuthSession>(Operation::Login, 401, r#"{"error":"Invalid credentials"}"#).expect_err("rejected");
    assert_eq!(err, ApiError::Rejected { status: 401, message: "Invalid credentials".to_owned() });
}

#[test]
fn delete_no_content_is_success() {
    assert_eq!(expect_success(Operation::Delete, 204, ""), Ok(()));
}

#[test]
fn missing_blueprint_uses_fallback() {
    let err = decode::<Blueprint>(Operation::Fetch, 404, "").expect_err("rejected");
    assert_eq!(err.to_string(), "Failed to fetch blueprint");
}

#[test]
fn created_blueprint_round_trips_through_fetch_contract() {
    let created: Blueprint =
        decode(Operation::Create, 201, r#"{"author":"juan","name":"nuevo","points":[]}"#).expect("decodes");
    let fetched: Blueprint =
        decode(Operation::Fetch, 200, r#"{"author":"juan","name":"nuevo","points":[]}"#).expect("decodes");
    assert_eq!(created, fetched);
    assert!(fetched.points.is_empty());
}

#[test]
fn bearer_header_is_attached_when_token_present() {
    let client = RestClient::new("http://localhost:8080/", Some("t-1".to_owned()));
    let request = client.request(Method::GET, rest::AUTH_VERIFY).build().expect("request");
    assert_eq!(request.url().as_str(), "http://localhost:8080/api/auth/verify");
    let header = request.headers().get(reqwest::header::AUTHORIZATION).expect("header");
    assert_eq!(header.to_str().expect("ascii"), "Bearer t-1");
}

#[test]
fn no_header_without_token() {
    let client = RestClient::new("http://localhost:3001", None);
    let request = client.request(Method::GET, "/api/blueprints/juan").build().expect("request");
    assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
}
