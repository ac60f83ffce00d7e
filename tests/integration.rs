//! Integration tests for the expense audit engine.
//!
//! This test suite covers:
//! - The full parse-then-aggregate pipeline
//! - The /ingest endpoint, including file-kind dispatch
//! - The /dashboard, /department-view and /assistant endpoints
//! - Error cases and status codes

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use expense_audit::aggregation::process_dashboard_data;
use expense_audit::api::{AppState, create_router};
use expense_audit::classification::ColumnRules;
use expense_audit::config::{AuditConfig, AuditSettings, ConfigLoader};
use expense_audit::ingest::RecordParser;
use expense_audit::models::{Category, DepartmentId};

// =============================================================================
// Test Helpers
// =============================================================================

const HEADER: &str = "Employee Name,Employee ID,Employee Department,Parent Expense Type,Expense Type,Amount,Violation,Date";

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default")
        .expect("Failed to load config")
        .into_config();
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn csv(rows: &[&str]) -> String {
    std::iter::once(HEADER)
        .chain(rows.iter().copied())
        .collect::<Vec<_>>()
        .join("\n")
}

fn sample_csv() -> String {
    csv(&[
        "Alice,E1,Engineering,Hotel,Lodging,200,Yes,2024-03-01",
        "Bob,E2,Finance,Airfare,Flight,500,No,2024-03-02",
        "Carol,E3,Field Sales,Meals,Dinner,\"$1,050.25\",Violation,2024-04-10",
        "Dan,E4,Zoology,Past Due,Card,75,No,2024-04-11",
        "Erin,E5,Legal,Misc pending,Note,20,true,",
        "Frank,E6,Finance",
    ])
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(router, uri, body.to_string()).await
}

async fn post_raw(router: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

async fn ingest(files: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/ingest", json!({ "files": files })).await
}

async fn ingest_sample_records() -> Value {
    let (status, body) = ingest(json!([{ "name": "march.csv", "content": sample_csv() }])).await;
    assert_eq!(status, StatusCode::OK);
    body["records"].clone()
}

// =============================================================================
// Pipeline
// =============================================================================

#[test]
fn test_pipeline_reference_example() {
    let parser = RecordParser::default().with_today(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    let records = parser
        .parse(&csv(&[
            "Alice,E1,Engineering,Hotel,Lodging,200,Yes,2024-03-01",
            "Bob,E2,Finance,Airfare,Flight,500,No,2024-03-02",
        ]))
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].department, DepartmentId::Dept1);
    assert_eq!(records[0].category, Category::Hotel);
    assert_eq!(records[1].department, DepartmentId::Dept2);
    assert_eq!(records[1].category, Category::Airfare);

    let dashboard = process_dashboard_data(&records, None);
    assert_eq!(dashboard.total_stats.total_violations, 1);
    assert_eq!(dashboard.total_stats.active_cases, 1);
    assert_eq!(dashboard.total_stats.compliance_rate, 50);
    assert_eq!(dashboard.total_stats.avg_violation, decimal("200"));
}

#[test]
fn test_pipeline_sample_batch() {
    let parser = RecordParser::default().with_today(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    let report = parser.parse_with_report(&sample_csv()).unwrap();

    assert_eq!(report.records.len(), 5);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 6);

    let carol = &report.records[2];
    assert_eq!(carol.department, DepartmentId::Dept3);
    assert_eq!(carol.amount, decimal("1050.25"));
    assert!(carol.is_violation);

    let dan = &report.records[3];
    assert_eq!(dan.department, DepartmentId::Dept4);
    assert_eq!(dan.category, Category::PastDue);
    assert_eq!(dan.source_department(), Some("Zoology"));

    let erin = &report.records[4];
    assert_eq!(erin.category, Category::Exceptions);
    assert_eq!(erin.date, "2024-05-01");

    let dashboard = process_dashboard_data(&report.records, None);
    assert_eq!(dashboard.total_spending(), decimal("1845.25"));
    assert_eq!(dashboard.total_stats.total_violations, 3);
    assert_eq!(dashboard.total_stats.compliance_rate, 40);
    // (200 + 1050.25 + 20) / 3 = 423.42
    assert_eq!(dashboard.total_stats.avg_violation, decimal("423"));
}

#[test]
fn test_shipped_config_equals_defaults() {
    let loaded = ConfigLoader::load("./config/default").unwrap().into_config();
    assert_eq!(loaded, AuditConfig::default());
}

// =============================================================================
// /ingest
// =============================================================================

#[tokio::test]
async fn test_ingest_returns_records_dashboard_and_mapping() {
    let (status, body) = ingest(json!([{ "name": "march.csv", "content": sample_csv() }])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"].as_array().unwrap().len(), 5);
    assert_eq!(body["records"][0]["id"], "1-HOTEL");
    assert_eq!(body["records"][0]["department"], "DPTID1");
    assert_eq!(body["records"][2]["category"], "MEALS");

    assert_eq!(body["skipped_rows"][0]["file"], "march.csv");
    assert_eq!(body["skipped_rows"][0]["line"], 6);
    assert_eq!(body["skipped_rows"][0]["reason"], "too_few_fields");

    assert_eq!(body["dashboard"]["total_stats"]["total_violations"], 3);
    assert_eq!(body["dashboard"]["chart_data"].as_array().unwrap().len(), 6);
    assert_eq!(
        body["dashboard"]["department_ranking"]
            .as_array()
            .unwrap()
            .len(),
        7
    );

    let mapping = body["department_mapping"].as_array().unwrap();
    assert_eq!(mapping[0]["department"], "DPTID1");
    assert_eq!(mapping[0]["source_names"], json!(["Engineering"]));
}

#[tokio::test]
async fn test_ingest_with_department_filter() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/ingest",
        json!({
            "files": [{ "name": "march.csv", "content": sample_csv() }],
            "department": "dptid2"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"].as_array().unwrap().len(), 5);
    assert_eq!(body["dashboard"]["total_stats"]["total_violations"], 0);
    assert_eq!(body["dashboard"]["total_stats"]["compliance_rate"], 100);
    assert_eq!(body["dashboard"]["department_ranking"][0]["violations"], 1);
}

#[tokio::test]
async fn test_ingest_concatenates_files() {
    let (status, body) = ingest(json!([
        { "name": "march.csv", "content": sample_csv() },
        { "name": "april.xlsx", "content": csv(&["Gina,E7,HR,Car Rental,Compact,90,No,2024-04-02"]) }
    ]))
    .await;

    assert_eq!(status, StatusCode::OK);
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[5]["employee_name"], "Gina");
    assert_eq!(records[5]["id"], "1-CAR_RENTAL");
}

#[tokio::test]
async fn test_ingest_stray_quote_skips_one_line() {
    let content = csv(&[
        "Alice,E1,Engineering,Hotel,\"Lodging,200,Yes,2024-03-01",
        "Bob,E2,Finance,Airfare,Flight,500,No,2024-03-02",
        "Carol,E3,Field Sales,Meals,Dinner,45,Yes,2024-03-03",
    ]);
    let (status, body) = ingest(json!([{ "name": "quotes.csv", "content": content }])).await;

    assert_eq!(status, StatusCode::OK);
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["employee_name"], "Bob");
    assert_eq!(records[1]["employee_name"], "Carol");
    assert_eq!(
        body["skipped_rows"],
        json!([{ "file": "quotes.csv", "line": 1, "reason": "unreadable" }])
    );
}

#[tokio::test]
async fn test_ingest_huge_amounts_do_not_overflow() {
    let content = csv(&[
        "Alice,E1,Engineering,Hotel,Lodging,79228162514264337593543950335,Yes,2024-03-01",
        "Alice,E1,Engineering,Hotel,Lodging,7e28,Yes,2024-03-02",
    ]);
    let (status, body) = ingest(json!([{ "name": "huge.csv", "content": content }])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"].as_array().unwrap().len(), 2);
    let hotel = &body["dashboard"]["chart_data"][0];
    assert_eq!(hotel["category"], "HOTEL");
    assert_eq!(hotel["value"], "79228162514264337593543950335");
    assert_eq!(
        body["dashboard"]["violation_people"][0]["amount"],
        "79228162514264337593543950335"
    );
}

#[tokio::test]
async fn test_ingest_missing_column_is_unprocessable() {
    let content = "Employee Name,Department,Parent Expense Type,Expense Type\nAlice,IT,Hotel,Room";
    let (status, body) = ingest(json!([{ "name": "bad.csv", "content": content }])).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "MISSING_COLUMN");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Could not find Employee ID column")
    );
    assert!(body["details"].as_str().unwrap().contains("employee name"));
}

#[tokio::test]
async fn test_ingest_no_valid_records() {
    let content = csv(&["Frank,E6,Finance"]);
    let (status, body) = ingest(json!([{ "name": "short.csv", "content": content }])).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NO_VALID_RECORDS");
}

#[tokio::test]
async fn test_ingest_empty_file() {
    let (status, body) = ingest(json!([{ "name": "empty.csv", "content": HEADER }])).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "EMPTY_INPUT");
}

#[tokio::test]
async fn test_ingest_binary_spreadsheet() {
    let (status, body) = ingest(json!([{ "name": "q1.xlsx", "content": "PK\u{3}\u{4}" }])).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["code"], "BINARY_SPREADSHEET");
    assert!(body["message"].as_str().unwrap().contains("q1.xlsx"));
}

#[tokio::test]
async fn test_ingest_unsupported_file() {
    let (status, body) = ingest(json!([{ "name": "notes.pdf", "content": "hello" }])).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["code"], "UNSUPPORTED_FILE");
}

#[tokio::test]
async fn test_ingest_no_files() {
    let (status, body) = ingest(json!([])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NO_FILES");
}

#[tokio::test]
async fn test_ingest_unknown_department_filter() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/ingest",
        json!({
            "files": [{ "name": "march.csv", "content": sample_csv() }],
            "department": "Finance"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_DEPARTMENT");
}

#[tokio::test]
async fn test_ingest_oversize_body() {
    let settings: AuditSettings = serde_yaml::from_str("upload:\n  max_bytes: 64\n").unwrap();
    let config = AuditConfig::new(settings, ColumnRules::default());
    let router = create_router(AppState::new(config));

    let (status, _) = post_json(
        router,
        "/ingest",
        json!({ "files": [{ "name": "march.csv", "content": sample_csv() }] }),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

// =============================================================================
// /dashboard, /department-view, /assistant
// =============================================================================

#[tokio::test]
async fn test_dashboard_from_returned_records() {
    let records = ingest_sample_records().await;
    let (status, body) = post_json(
        create_router_for_test(),
        "/dashboard",
        json!({ "records": records, "department": "DPTID3" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_stats"]["total_violations"], 1);
    assert_eq!(body["total_stats"]["active_cases"], 1);
    assert_eq!(body["violation_people"][0]["name"], "Carol");
    assert_eq!(body["violation_people"][0]["eid"], "E7737");
    assert_eq!(body["total_stats"]["avg_violation"], "1050");
}

#[tokio::test]
async fn test_department_view_endpoint() {
    let records = ingest_sample_records().await;
    let (status, body) = post_json(
        create_router_for_test(),
        "/department-view",
        json!({ "records": records, "department": "DPTID7" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["department"], "DPTID7");
    assert_eq!(body["total_spending"], "20");
    assert_eq!(body["pending_review"][0]["name"], "Erin");
    assert_eq!(body["pending_review"][0]["reason"], "Pending Review");
    assert_eq!(body["violation_cards"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_department_view_requires_department() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/department-view",
        json!({ "records": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_assistant_endpoint() {
    let records = ingest_sample_records().await;
    let (status, body) = post_json(
        create_router_for_test(),
        "/assistant",
        json!({ "records": records, "message": "Who didn't pass the audit?" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["reply"],
        "The following employees didn't pass the audit: Alice, Carol, Erin."
    );
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let (status, body) =
        post_raw(create_router_for_test(), "/dashboard", "{ not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}
