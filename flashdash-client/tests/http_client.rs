//! HTTP client behavior against a mocked backend

use serde_json::{Map, Value, json};
use wiremock::matchers::{body_json_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flashdash_client::{
    ClientConfig, ClientError, EventBus, ReportSection, RibbonKind, UiEvent,
    file_number::extract_file_number,
};

fn client_for(server: &MockServer) -> flashdash_client::HttpClient {
    ClientConfig::new(server.uri())
        .with_token("test-jwt")
        .build_http_client()
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json_string(
            r#"{"email":"jane@flashdash.vip","password":"secret"}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "issued-jwt",
            "user": {"id": 7, "email": "jane@flashdash.vip", "role": "opener"}
        })))
        .mount(&server)
        .await;

    let client = ClientConfig::new(server.uri()).build_http_client();
    let login = client.login("jane@flashdash.vip", "secret").await.unwrap();

    assert_eq!(login.token, "issued-jwt");
    assert_eq!(login.user.id, 7);
    assert_eq!(login.user.role, "opener");
}

#[tokio::test]
async fn error_statuses_map_onto_client_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/forthcrm/sync/status"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"code": 1002, "message": "Invalid token"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/submissions/submit-lead"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 2001,
            "message": "Missing required fields: Fname, Lname",
            "details": {"missing": ["Fname", "Lname"]}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert!(matches!(
        client.sync_status().await,
        Err(ClientError::SessionExpired)
    ));

    let err = client.submit_lead(&Map::new()).await.unwrap_err();
    match &err {
        ClientError::Validation { message, missing } => {
            assert_eq!(message, "Missing required fields: Fname, Lname");
            assert_eq!(missing, &["Fname", "Lname"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(err.missing_fields(), ["Fname", "Lname"]);
}

#[tokio::test]
async fn bearer_header_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports/company"))
        .and(wiremock::matchers::header(
            "authorization",
            "Bearer test-jwt",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "live",
            "rows": [{"leads_received": 4}]
        })))
        .mount(&server)
        .await;

    let report = client_for(&server)
        .report_section(ReportSection::Company)
        .await
        .unwrap();
    assert_eq!(report.rows.len(), 1);
}

#[tokio::test]
async fn fallback_report_emits_cached_data_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports/opener"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fallback",
            "rows": []
        })))
        .mount(&server)
        .await;

    let events = EventBus::new();
    let mut rx = events.subscribe();
    let client = ClientConfig::new(server.uri())
        .with_token("test-jwt")
        .build_http_client()
        .with_events(events);

    let report = client.report_section(ReportSection::Opener).await.unwrap();
    assert!(report.status.is_fallback());
    assert_eq!(
        rx.recv().await.unwrap(),
        UiEvent::Notice {
            message: "Cached data displayed".to_string()
        }
    );
}

#[tokio::test]
async fn submit_lead_emits_ribbon_and_yields_file_number() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submissions/submit-lead"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-forth-file-number", "999000")
                .set_body_json(json!({"ok": true, "forth_response": "Success:123456"})),
        )
        .mount(&server)
        .await;

    let events = EventBus::new();
    let mut rx = events.subscribe();
    let client = ClientConfig::new(server.uri())
        .build_http_client()
        .with_events(events);

    let mut payload = Map::new();
    payload.insert("first_name".to_string(), Value::String("Jane".to_string()));
    let outcome = client.submit_lead(&payload).await.unwrap();

    let file_number = extract_file_number(
        &outcome.body["forth_response"],
        outcome.file_number_header.as_deref(),
    );
    assert_eq!(file_number, "123456");

    match rx.recv().await.unwrap() {
        UiEvent::Ribbon { kind, message } => {
            assert_eq!(kind, RibbonKind::Success);
            assert_eq!(message, "Lead submitted");
        }
        other => panic!("expected ribbon, got {other:?}"),
    }
}

#[tokio::test]
async fn visible_sections_fetch_isolates_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports/opener"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "live",
            "rows": [{"agent": "Jane"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/reports/comparison"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let results = client_for(&server).fetch_visible_sections("opener").await;
    assert_eq!(results.len(), 2);

    let (section, opener) = &results[0];
    assert_eq!(*section, ReportSection::Opener);
    assert_eq!(opener.as_ref().unwrap().rows.len(), 1);

    let (section, comparison) = &results[1];
    assert_eq!(*section, ReportSection::Comparison);
    assert!(comparison.is_err());
}

#[tokio::test]
async fn summary_passes_role_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/summary"))
        .and(query_param("role", "intake"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "live",
            "totalLeads": 12,
            "pendingLeads": 2,
            "conversionRate": 25.0,
            "weeklyPerformance": [],
            "dailyMetrics": [],
            "pendingLabel": "Enrolled Leads"
        })))
        .mount(&server)
        .await;

    let summary = client_for(&server).summary(Some("intake")).await.unwrap();
    assert_eq!(summary.summary.total_leads, 12);
    assert_eq!(summary.summary.pending_label, "Enrolled Leads");
}
