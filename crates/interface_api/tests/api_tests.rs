//! API integration tests
//!
//! End-to-end tests against the full router backed by a containerized
//! PostgreSQL instance. Each test owns its database, so state never
//! leaks between cases.

use axum::http::StatusCode;
use axum_test::TestServer;
use interface_api::{config::ApiConfig, create_router};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use test_utils::assertions::assert_decimal_approx_eq;
use test_utils::database::TestDatabase;
use test_utils::generators::{unique_email, unique_session_code};

// ============================================================================
// Test setup helpers
// ============================================================================

/// Starts a server over a fresh database; the returned handle keeps the
/// container alive for the duration of the test.
async fn spawn_server() -> (TestServer, TestDatabase) {
    let db = TestDatabase::new().await.expect("test database");
    let app = create_router(db.pool.clone(), ApiConfig::default());
    let server = TestServer::new(app).expect("test server");
    (server, db)
}

fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("id field").to_string()
}

fn decimal_field(body: &Value, field: &str) -> Decimal {
    serde_json::from_value(body[field].clone()).expect("decimal field")
}

async fn create_student(server: &TestServer) -> Value {
    let response = server
        .post("/api/v1/students")
        .json(&json!({
            "first_name": "Claire",
            "last_name": "Moreau",
            "email": unique_email(),
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

async fn create_session(server: &TestServer, price: &str) -> Value {
    let response = server
        .post("/api/v1/sessions")
        .json(&json!({
            "code": unique_session_code(),
            "title": "Systems Programming in Rust",
            "start_date": "2025-09-01",
            "end_date": "2025-12-19",
            "price": price,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

/// Creates student, session, and enrollment; returns the enrollment body
async fn create_enrollment(server: &TestServer) -> Value {
    let student = create_student(server).await;
    let session = create_session(server, "1200.00").await;

    let response = server
        .post("/api/v1/enrollments")
        .json(&json!({
            "student_id": id_of(&student),
            "session_id": id_of(&session),
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

async fn create_invoice(server: &TestServer, enrollment_id: &str, amount: &str) -> Value {
    let response = server
        .post("/api/v1/invoices")
        .json(&json!({
            "enrollment_id": enrollment_id,
            "amount": amount,
            "due_date": "2025-10-15",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

async fn pay(server: &TestServer, invoice_id: &str, amount: &str) -> axum_test::TestResponse {
    server
        .post("/api/v1/payments")
        .json(&json!({
            "invoice_id": invoice_id,
            "amount": amount,
            "method": "card",
        }))
        .await
}

async fn get_invoice(server: &TestServer, invoice_id: &str) -> Value {
    let response = server
        .get(&format!("/api/v1/invoices/{}", invoice_id))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

async fn get_enrollment(server: &TestServer, enrollment_id: &str) -> Value {
    let response = server
        .get(&format!("/api/v1/enrollments/{}", enrollment_id))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

// ============================================================================
// Health checks
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let (server, _db) = spawn_server().await;

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["status"], "up");

    let ready = server.get("/health/ready").await;
    ready.assert_status_ok();
    assert_eq!(ready.json::<Value>()["status"], "ready");
}

// ============================================================================
// Students
// ============================================================================

#[tokio::test]
async fn test_student_creation_and_lookup() {
    let (server, _db) = spawn_server().await;

    let email = unique_email();
    let created = server
        .post("/api/v1/students")
        .json(&json!({
            "first_name": "Nadia",
            "last_name": "Benali",
            "email": email,
            "phone": "+33-6-12-34-56-78",
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body = created.json::<Value>();
    assert_eq!(body["first_name"], "Nadia");
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["phone"], "+33-6-12-34-56-78");

    let fetched = server
        .get(&format!("/api/v1/students/{}", id_of(&body)))
        .await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<Value>()["email"], email.as_str());

    let listed = server.get("/api/v1/students").await;
    listed.assert_status_ok();
    assert_eq!(listed.json::<Value>().as_array().unwrap().len(), 1);

    let missing = server
        .get(&format!("/api/v1/students/{}", uuid::Uuid::new_v4()))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["error"], "not_found");
}

#[tokio::test]
async fn test_student_duplicate_email_conflicts() {
    let (server, _db) = spawn_server().await;

    let email = unique_email();
    let body = json!({
        "first_name": "Nadia",
        "last_name": "Benali",
        "email": email,
    });

    let first = server.post("/api/v1/students").json(&body).await;
    first.assert_status(StatusCode::CREATED);

    let second = server.post("/api/v1/students").json(&body).await;
    second.assert_status(StatusCode::CONFLICT);
    assert_eq!(second.json::<Value>()["error"], "conflict");
}

#[tokio::test]
async fn test_student_validation_rejects_malformed_input() {
    let (server, _db) = spawn_server().await;

    let response = server
        .post("/api/v1/students")
        .json(&json!({
            "first_name": "",
            "last_name": "Benali",
            "email": "not-an-email",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].is_array());
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_session_creation_and_validation() {
    let (server, _db) = spawn_server().await;

    let session = create_session(&server, "1500.00").await;
    assert_eq!(decimal_field(&session, "price"), dec!(1500.00));

    let fetched = server
        .get(&format!("/api/v1/sessions/{}", id_of(&session)))
        .await;
    fetched.assert_status_ok();

    // End date before start date
    let inverted = server
        .post("/api/v1/sessions")
        .json(&json!({
            "code": unique_session_code(),
            "title": "Backwards",
            "start_date": "2025-12-19",
            "end_date": "2025-09-01",
            "price": "100.00",
        }))
        .await;
    inverted.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_duplicate_code_conflicts() {
    let (server, _db) = spawn_server().await;

    let code = unique_session_code();
    let body = json!({
        "code": code,
        "title": "Systems Programming in Rust",
        "start_date": "2025-09-01",
        "end_date": "2025-12-19",
        "price": "1200.00",
    });

    let first = server.post("/api/v1/sessions").json(&body).await;
    first.assert_status(StatusCode::CREATED);

    let second = server.post("/api/v1/sessions").json(&body).await;
    second.assert_status(StatusCode::CONFLICT);
}

// ============================================================================
// Enrollments
// ============================================================================

#[tokio::test]
async fn test_enrollment_defaults_total_to_session_price() {
    let (server, _db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    assert_eq!(decimal_field(&enrollment, "total_amount"), dec!(1200.00));
    assert_eq!(decimal_field(&enrollment, "paid_amount"), Decimal::ZERO);
    assert_eq!(
        decimal_field(&enrollment, "outstanding_balance"),
        dec!(1200.00)
    );
}

#[tokio::test]
async fn test_enrollment_accepts_negotiated_total() {
    let (server, _db) = spawn_server().await;

    let student = create_student(&server).await;
    let session = create_session(&server, "1200.00").await;

    let response = server
        .post("/api/v1/enrollments")
        .json(&json!({
            "student_id": id_of(&student),
            "session_id": id_of(&session),
            "total_amount": "950.00",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        decimal_field(&response.json::<Value>(), "total_amount"),
        dec!(950.00)
    );
}

#[tokio::test]
async fn test_enrollment_requires_existing_student_and_session() {
    let (server, _db) = spawn_server().await;

    let session = create_session(&server, "1200.00").await;
    let ghost = uuid::Uuid::new_v4().to_string();

    let no_student = server
        .post("/api/v1/enrollments")
        .json(&json!({
            "student_id": ghost,
            "session_id": id_of(&session),
        }))
        .await;
    no_student.assert_status(StatusCode::NOT_FOUND);

    let student = create_student(&server).await;
    let no_session = server
        .post("/api/v1/enrollments")
        .json(&json!({
            "student_id": id_of(&student),
            "session_id": ghost,
        }))
        .await;
    no_session.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_enrollment_duplicate_pair_conflicts() {
    let (server, _db) = spawn_server().await;

    let student = create_student(&server).await;
    let session = create_session(&server, "1200.00").await;
    let body = json!({
        "student_id": id_of(&student),
        "session_id": id_of(&session),
    });

    let first = server.post("/api/v1/enrollments").json(&body).await;
    first.assert_status(StatusCode::CREATED);

    let second = server.post("/api/v1/enrollments").json(&body).await;
    second.assert_status(StatusCode::CONFLICT);
}

// ============================================================================
// Invoices
// ============================================================================

#[tokio::test]
async fn test_invoice_starts_unpaid_with_full_balance() {
    let (server, _db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    let invoice = create_invoice(&server, &id_of(&enrollment), "500.00").await;

    assert_eq!(invoice["status"], "unpaid");
    assert!(invoice["invoice_number"].as_str().unwrap().starts_with("INV-"));
    assert_eq!(decimal_field(&invoice, "amount_paid"), Decimal::ZERO);
    assert_eq!(decimal_field(&invoice, "remaining_balance"), dec!(500.00));

    let fetched = get_invoice(&server, &id_of(&invoice)).await;
    assert_eq!(fetched["status"], "unpaid");

    let listed = server
        .get(&format!("/api/v1/enrollments/{}/invoices", id_of(&enrollment)))
        .await;
    listed.assert_status_ok();
    assert_eq!(listed.json::<Value>().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invoice_requires_existing_enrollment() {
    let (server, _db) = spawn_server().await;

    let response = server
        .post("/api/v1/invoices")
        .json(&json!({
            "enrollment_id": uuid::Uuid::new_v4().to_string(),
            "amount": "500.00",
            "due_date": "2025-10-15",
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invoice_rejects_non_positive_amount() {
    let (server, _db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    let response = server
        .post("/api/v1/invoices")
        .json(&json!({
            "enrollment_id": id_of(&enrollment),
            "amount": "0.00",
            "due_date": "2025-10-15",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Payment reconciliation
// ============================================================================

#[tokio::test]
async fn test_payment_flow_derives_status_and_paid_amount() {
    let (server, _db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    let enrollment_id = id_of(&enrollment);
    let invoice = create_invoice(&server, &enrollment_id, "500.00").await;
    let invoice_id = id_of(&invoice);

    // Partial payment moves the invoice to partially_paid
    let first = pay(&server, &invoice_id, "200.00").await;
    first.assert_status(StatusCode::CREATED);

    let after_first = get_invoice(&server, &invoice_id).await;
    assert_eq!(after_first["status"], "partially_paid");
    assert_eq!(decimal_field(&after_first, "amount_paid"), dec!(200.00));
    assert_eq!(
        decimal_field(&after_first, "remaining_balance"),
        dec!(300.00)
    );

    let enrollment_state = get_enrollment(&server, &enrollment_id).await;
    assert_eq!(decimal_field(&enrollment_state, "paid_amount"), dec!(200.00));
    assert_eq!(
        decimal_field(&enrollment_state, "outstanding_balance"),
        dec!(1000.00)
    );

    // Filling the remainder marks the invoice paid
    let second = pay(&server, &invoice_id, "300.00").await;
    second.assert_status(StatusCode::CREATED);

    let after_second = get_invoice(&server, &invoice_id).await;
    assert_eq!(after_second["status"], "paid");
    assert_eq!(decimal_field(&after_second, "amount_paid"), dec!(500.00));
    assert_eq!(decimal_field(&after_second, "remaining_balance"), Decimal::ZERO);

    let settled = get_enrollment(&server, &enrollment_id).await;
    assert_eq!(decimal_field(&settled, "paid_amount"), dec!(500.00));
}

#[tokio::test]
async fn test_overpayment_rejected_without_side_effects() {
    let (server, db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    let enrollment_id = id_of(&enrollment);
    let invoice = create_invoice(&server, &enrollment_id, "500.00").await;
    let invoice_id = id_of(&invoice);

    pay(&server, &invoice_id, "300.00")
        .await
        .assert_status(StatusCode::CREATED);

    // 250.00 would push the total to 550.00 against a 500.00 invoice
    let rejected = pay(&server, &invoice_id, "250.00").await;
    rejected.assert_status(StatusCode::BAD_REQUEST);
    let body = rejected.json::<Value>();
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("200.00"));

    // Nothing moved: invoice, enrollment, and the stored payment set
    let invoice_state = get_invoice(&server, &invoice_id).await;
    assert_eq!(invoice_state["status"], "partially_paid");
    assert_eq!(decimal_field(&invoice_state, "amount_paid"), dec!(300.00));

    let enrollment_state = get_enrollment(&server, &enrollment_id).await;
    assert_eq!(decimal_field(&enrollment_state, "paid_amount"), dec!(300.00));

    let stored_total: Decimal = sqlx::query_scalar(
        "SELECT COALESCE(SUM(amount), 0) FROM payments",
    )
    .fetch_one(db.pool())
    .await
    .expect("payment sum");
    assert_decimal_approx_eq(stored_total, dec!(300.00), Decimal::ZERO);
}

#[tokio::test]
async fn test_exact_fill_is_accepted() {
    let (server, _db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    let invoice = create_invoice(&server, &id_of(&enrollment), "500.00").await;
    let invoice_id = id_of(&invoice);

    pay(&server, &invoice_id, "500.00")
        .await
        .assert_status(StatusCode::CREATED);

    let state = get_invoice(&server, &invoice_id).await;
    assert_eq!(state["status"], "paid");
    assert_eq!(decimal_field(&state, "remaining_balance"), Decimal::ZERO);

    // The invoice is settled; even one cent more must be rejected
    let over = pay(&server, &invoice_id, "0.01").await;
    over.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_void_payment_rewinds_and_recreation_restores() {
    let (server, _db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    let enrollment_id = id_of(&enrollment);
    let invoice = create_invoice(&server, &enrollment_id, "500.00").await;
    let invoice_id = id_of(&invoice);

    let payment = pay(&server, &invoice_id, "200.00").await;
    payment.assert_status(StatusCode::CREATED);
    let payment_id = id_of(&payment.json::<Value>());

    let deleted = server
        .delete(&format!("/api/v1/payments/{}", payment_id))
        .await;
    deleted.assert_status(StatusCode::NO_CONTENT);

    let rewound = get_invoice(&server, &invoice_id).await;
    assert_eq!(rewound["status"], "unpaid");
    assert_eq!(decimal_field(&rewound, "amount_paid"), Decimal::ZERO);

    let enrollment_state = get_enrollment(&server, &enrollment_id).await;
    assert_eq!(decimal_field(&enrollment_state, "paid_amount"), Decimal::ZERO);

    // Recreating an identical payment restores the prior state
    pay(&server, &invoice_id, "200.00")
        .await
        .assert_status(StatusCode::CREATED);

    let restored = get_invoice(&server, &invoice_id).await;
    assert_eq!(restored["status"], "partially_paid");
    assert_eq!(decimal_field(&restored, "amount_paid"), dec!(200.00));

    let restored_enrollment = get_enrollment(&server, &enrollment_id).await;
    assert_eq!(
        decimal_field(&restored_enrollment, "paid_amount"),
        dec!(200.00)
    );
}

#[tokio::test]
async fn test_amend_payment_moves_paid_total_by_delta() {
    let (server, _db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    let enrollment_id = id_of(&enrollment);
    let invoice = create_invoice(&server, &enrollment_id, "500.00").await;
    let invoice_id = id_of(&invoice);

    let payment = pay(&server, &invoice_id, "200.00").await;
    payment.assert_status(StatusCode::CREATED);
    let payment_id = id_of(&payment.json::<Value>());

    // Growing the payment
    let grown = server
        .put(&format!("/api/v1/payments/{}", payment_id))
        .json(&json!({ "amount": "350.00" }))
        .await;
    grown.assert_status_ok();
    assert_eq!(decimal_field(&grown.json::<Value>(), "amount"), dec!(350.00));

    let after_grow = get_invoice(&server, &invoice_id).await;
    assert_eq!(decimal_field(&after_grow, "amount_paid"), dec!(350.00));
    assert_eq!(
        decimal_field(&get_enrollment(&server, &enrollment_id).await, "paid_amount"),
        dec!(350.00)
    );

    // Shrinking is symmetric
    let shrunk = server
        .put(&format!("/api/v1/payments/{}", payment_id))
        .json(&json!({ "amount": "150.00" }))
        .await;
    shrunk.assert_status_ok();

    let after_shrink = get_invoice(&server, &invoice_id).await;
    assert_eq!(decimal_field(&after_shrink, "amount_paid"), dec!(150.00));
    assert_eq!(after_shrink["status"], "partially_paid");
    assert_eq!(
        decimal_field(&get_enrollment(&server, &enrollment_id).await, "paid_amount"),
        dec!(150.00)
    );

    // Method-only amendment leaves every total untouched
    let method_only = server
        .put(&format!("/api/v1/payments/{}", payment_id))
        .json(&json!({ "method": "cash" }))
        .await;
    method_only.assert_status_ok();
    let body = method_only.json::<Value>();
    assert_eq!(body["method"], "cash");
    assert_eq!(decimal_field(&body, "amount"), dec!(150.00));
    assert_eq!(
        decimal_field(&get_enrollment(&server, &enrollment_id).await, "paid_amount"),
        dec!(150.00)
    );
}

#[tokio::test]
async fn test_amend_payment_applies_overpayment_guard() {
    let (server, _db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    let invoice = create_invoice(&server, &id_of(&enrollment), "500.00").await;
    let invoice_id = id_of(&invoice);

    let first = pay(&server, &invoice_id, "200.00").await;
    first.assert_status(StatusCode::CREATED);
    let first_id = id_of(&first.json::<Value>());

    pay(&server, &invoice_id, "250.00")
        .await
        .assert_status(StatusCode::CREATED);

    // Other payments cover 250.00, so the first may grow to 250.00 at most
    let rejected = server
        .put(&format!("/api/v1/payments/{}", first_id))
        .json(&json!({ "amount": "300.00" }))
        .await;
    rejected.assert_status(StatusCode::BAD_REQUEST);
    assert!(rejected.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .contains("250.00"));

    // The edited payment kept its amount
    let unchanged = server
        .get(&format!("/api/v1/payments/{}", first_id))
        .await;
    unchanged.assert_status_ok();
    assert_eq!(
        decimal_field(&unchanged.json::<Value>(), "amount"),
        dec!(200.00)
    );

    let invoice_state = get_invoice(&server, &invoice_id).await;
    assert_eq!(decimal_field(&invoice_state, "amount_paid"), dec!(450.00));
}

#[tokio::test]
async fn test_payment_edge_cases() {
    let (server, _db) = spawn_server().await;

    // Payment against a missing invoice
    let ghost_invoice = pay(&server, &uuid::Uuid::new_v4().to_string(), "100.00").await;
    ghost_invoice.assert_status(StatusCode::NOT_FOUND);

    // Non-positive amount
    let enrollment = create_enrollment(&server).await;
    let invoice = create_invoice(&server, &id_of(&enrollment), "500.00").await;
    let zero = pay(&server, &id_of(&invoice), "0.00").await;
    zero.assert_status(StatusCode::BAD_REQUEST);

    // Fetching and voiding missing payments
    let ghost_id = uuid::Uuid::new_v4();
    let fetched = server.get(&format!("/api/v1/payments/{}", ghost_id)).await;
    fetched.assert_status(StatusCode::NOT_FOUND);

    let voided = server
        .delete(&format!("/api/v1/payments/{}", ghost_id))
        .await;
    voided.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invoice_payments_listed_chronologically() {
    let (server, _db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    let invoice = create_invoice(&server, &id_of(&enrollment), "500.00").await;
    let invoice_id = id_of(&invoice);

    server
        .post("/api/v1/payments")
        .json(&json!({
            "invoice_id": invoice_id,
            "amount": "100.00",
            "method": "card",
            "paid_at": "2025-10-02T10:00:00Z",
        }))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post("/api/v1/payments")
        .json(&json!({
            "invoice_id": invoice_id,
            "amount": "50.00",
            "method": "cash",
            "paid_at": "2025-10-01T09:00:00Z",
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let listed = server
        .get(&format!("/api/v1/invoices/{}/payments", invoice_id))
        .await;
    listed.assert_status_ok();
    let payments = listed.json::<Value>();
    let payments = payments.as_array().unwrap();
    assert_eq!(payments.len(), 2);
    assert_eq!(decimal_field(&payments[0], "amount"), dec!(50.00));
    assert_eq!(decimal_field(&payments[1], "amount"), dec!(100.00));
}

#[tokio::test]
async fn test_enrollment_balance_spans_invoices() {
    let (server, _db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    let enrollment_id = id_of(&enrollment);

    let deposit = create_invoice(&server, &enrollment_id, "300.00").await;
    let balance = create_invoice(&server, &enrollment_id, "900.00").await;

    pay(&server, &id_of(&deposit), "300.00")
        .await
        .assert_status(StatusCode::CREATED);
    pay(&server, &id_of(&balance), "150.00")
        .await
        .assert_status(StatusCode::CREATED);

    assert_eq!(get_invoice(&server, &id_of(&deposit)).await["status"], "paid");
    assert_eq!(
        get_invoice(&server, &id_of(&balance)).await["status"],
        "partially_paid"
    );

    // The enrollment total rolls up payments across both invoices
    let state = get_enrollment(&server, &enrollment_id).await;
    assert_eq!(decimal_field(&state, "paid_amount"), dec!(450.00));
    assert_eq!(decimal_field(&state, "outstanding_balance"), dec!(750.00));
}

// ============================================================================
// Grades
// ============================================================================

async fn record_grade(
    server: &TestServer,
    enrollment_id: &str,
    subject: &str,
    value: &str,
    max_value: &str,
    weight: &str,
) -> axum_test::TestResponse {
    server
        .post(&format!("/api/v1/enrollments/{}/grades", enrollment_id))
        .json(&json!({
            "subject": subject,
            "value": value,
            "max_value": max_value,
            "weight": weight,
        }))
        .await
}

async fn fetch_average(server: &TestServer, enrollment_id: &str) -> Value {
    let response = server
        .get(&format!("/api/v1/enrollments/{}/grades/average", enrollment_id))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

#[tokio::test]
async fn test_grade_average_lifecycle() {
    let (server, _db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    let enrollment_id = id_of(&enrollment);

    // No grades yet: the average is null
    let empty = fetch_average(&server, &enrollment_id).await;
    assert!(empty["average"].is_null());
    assert_eq!(empty["grade_count"], 0);

    // 12/20 weight 2 and 9/10 weight 1 average to 14 on the 20-point scale
    record_grade(&server, &enrollment_id, "Theory", "12", "20", "2")
        .await
        .assert_status(StatusCode::CREATED);
    record_grade(&server, &enrollment_id, "Lab", "9", "10", "1")
        .await
        .assert_status(StatusCode::CREATED);

    let listed = server
        .get(&format!("/api/v1/enrollments/{}/grades", enrollment_id))
        .await;
    listed.assert_status_ok();
    assert_eq!(listed.json::<Value>().as_array().unwrap().len(), 2);

    let averaged = fetch_average(&server, &enrollment_id).await;
    assert_eq!(averaged["grade_count"], 2);
    assert_eq!(decimal_field(&averaged, "average"), dec!(14.00));
}

#[tokio::test]
async fn test_grade_average_null_when_weights_are_zero() {
    let (server, _db) = spawn_server().await;

    let enrollment = create_enrollment(&server).await;
    let enrollment_id = id_of(&enrollment);

    record_grade(&server, &enrollment_id, "Theory", "15", "20", "0")
        .await
        .assert_status(StatusCode::CREATED);
    record_grade(&server, &enrollment_id, "Lab", "8", "10", "0")
        .await
        .assert_status(StatusCode::CREATED);

    let averaged = fetch_average(&server, &enrollment_id).await;
    assert_eq!(averaged["grade_count"], 2);
    assert!(averaged["average"].is_null());
}

#[tokio::test]
async fn test_grade_validation_and_missing_enrollment() {
    let (server, _db) = spawn_server().await;

    let ghost = uuid::Uuid::new_v4().to_string();
    record_grade(&server, &ghost, "Theory", "12", "20", "1")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let average = server
        .get(&format!("/api/v1/enrollments/{}/grades/average", ghost))
        .await;
    average.assert_status(StatusCode::NOT_FOUND);

    let enrollment = create_enrollment(&server).await;
    let enrollment_id = id_of(&enrollment);

    // Zero scale
    record_grade(&server, &enrollment_id, "Theory", "12", "0", "1")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Negative value
    record_grade(&server, &enrollment_id, "Theory", "-1", "20", "1")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Negative weight
    record_grade(&server, &enrollment_id, "Theory", "12", "20", "-1")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
