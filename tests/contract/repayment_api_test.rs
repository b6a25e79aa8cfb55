// Contract tests for the repayment planner HTTP API
//
// POST /api/calculate, POST /api/export_csv, GET /health, GET /

use actix_web::{http::header, test, App};
use serde_json::{json, Value};

fn plan_payload() -> Value {
    json!({
        "salary": 10000,
        "living_expense": 2000,
        "start_month": 1,
        "base_year": 2025,
        "debtors": [{"name": "Mum", "debt": 7000}],
        "courses": [{"fee": 6000, "months": 6}]
    })
}

/// Test POST /api/calculate returns the ledger and a summary
#[actix_web::test]
async fn test_calculate_contract() {
    let app = test::init_service(App::new().configure(repayplan::configure_app)).await;

    let req = test::TestRequest::post()
        .uri("/api/calculate")
        .set_json(plan_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert!(body["summary"].as_str().unwrap().contains("in 6 months"));

    let result = &body["result"];
    assert_eq!(result["status"], "ok");
    assert_eq!(result["total_months"], 6);
    assert_eq!(result["debtor_completion_month"]["Mum"], 1);
    assert_eq!(result["course_completion_month"]["course_1"], 6);

    let ledger = result["ledger"].as_array().unwrap();
    assert_eq!(ledger.len(), 6);
    assert_eq!(ledger[0]["calendar_label"], "2025/02");
    assert_eq!(ledger[0]["debtor_payments"]["Mum"], 7000.0);
    assert_eq!(ledger[0]["course_payments"]["course_1"], 1000.0);
    assert_eq!(ledger[5]["leftover_income_this_month"], 7000.0);
}

/// Salary that does not cover living expenses is a 400
#[actix_web::test]
async fn test_calculate_insufficient_income() {
    let app = test::init_service(App::new().configure(repayplan::configure_app)).await;

    let mut payload = plan_payload();
    payload["living_expense"] = json!(12000);

    let req = test::TestRequest::post()
        .uri("/api/calculate")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("must exceed living expense"));
}

/// A plan with nothing to repay is a 400
#[actix_web::test]
async fn test_calculate_no_obligations() {
    let app = test::init_service(App::new().configure(repayplan::configure_app)).await;

    let req = test::TestRequest::post()
        .uri("/api/calculate")
        .set_json(json!({"salary": 5000, "living_expense": 1000}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

/// A base year the calendar cannot label is a 400, not a worker failure
#[actix_web::test]
async fn test_calculate_rejects_out_of_range_base_year() {
    let app = test::init_service(App::new().configure(repayplan::configure_app)).await;

    let req = test::TestRequest::post()
        .uri("/api/calculate")
        .set_json(json!({
            "salary": 3000,
            "living_expense": 1000,
            "start_month": 12,
            "base_year": 2147483647,
            "debtors": [{"name": "A", "debt": 100}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Base year must be between 1 and 9999"));
}

/// A debt too small to register a payment is rejected up front
#[actix_web::test]
async fn test_calculate_rejects_negligible_debt() {
    let app = test::init_service(App::new().configure(repayplan::configure_app)).await;

    let req = test::TestRequest::post()
        .uri("/api/calculate")
        .set_json(json!({
            "salary": 3000,
            "living_expense": 1000,
            "debtors": [{"name": "A", "debt": 0.0005}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

/// Wrongly typed fields are rejected before the simulator runs
#[actix_web::test]
async fn test_calculate_rejects_malformed_body() {
    let app = test::init_service(App::new().configure(repayplan::configure_app)).await;

    let req = test::TestRequest::post()
        .uri("/api/calculate")
        .set_json(json!({"salary": "lots", "debtors": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
}

/// A plan that cannot finish within the horizon is a 422
#[actix_web::test]
async fn test_calculate_exceeds_horizon() {
    let app = test::init_service(App::new().configure(repayplan::configure_app)).await;

    let req = test::TestRequest::post()
        .uri("/api/calculate")
        .set_json(json!({
            "salary": 1001,
            "living_expense": 1000,
            "debtors": [{"name": "Bank", "debt": 1000000}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("2000 months"));
}

/// Test POST /api/export_csv returns a CSV attachment
#[actix_web::test]
async fn test_export_csv_contract() {
    let app = test::init_service(App::new().configure(repayplan::configure_app)).await;

    let req = test::TestRequest::post()
        .uri("/api/export_csv")
        .set_json(plan_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    assert!(resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("repay_result.csv"));

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"\xEF\xBB\xBF"));

    let text = std::str::from_utf8(&body[3..]).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "month,label,disposable_income,Mum paid,Mum remaining,course_1 paid,course_1 remaining,leftover"
    );
    assert_eq!(lines.len(), 7);
    assert_eq!(
        lines[1],
        "1,2025/02,8000.00,7000.00,0.00,1000.00,5000.00,0.00"
    );
}

/// Test GET /health liveness probe
#[actix_web::test]
async fn test_health_contract() {
    let app = test::init_service(App::new().configure(repayplan::configure_app)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

/// Test GET / serves the planner page
#[actix_web::test]
async fn test_index_page() {
    let app = test::init_service(App::new().configure(repayplan::configure_app)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("Repayment Planner"));
}
