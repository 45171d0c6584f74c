//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Local, NaiveDate};
use http_body_util::BodyExt;
use tally_core::models::{NewBudget, NewTransaction, TransactionType};
use tower::ServiceExt;

fn open_config() -> ServerConfig {
    ServerConfig {
        require_auth: false,
        ..Default::default()
    }
}

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    create_router(db, None, open_config())
}

fn setup_test_app_with_db() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    (create_router(db.clone(), None, open_config()), db)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn seed_tx(db: &Database, amount: f64, date: NaiveDate, category: &str, kind: TransactionType) -> i64 {
    db.create_transaction(&NewTransaction {
        amount,
        date,
        description: format!("{} purchase", category),
        category: category.to_string(),
        kind,
    })
    .unwrap()
    .id
}

// ========== Health & Auth ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_auth_required_by_default() {
    let db = Database::in_memory().unwrap();
    let app = create_router(db, None, ServerConfig::default());

    let response = app.clone().oneshot(get("/api/transactions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Health stays open
    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_key_auth() {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: true,
        api_keys: vec!["s3cret-key".to_string()],
        ..Default::default()
    };
    let app = create_router(db, None, config);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/dashboard")
                .header("authorization", "Bearer s3cret-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/dashboard")
                .header("authorization", "Bearer s3cret-kez")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Authentication required");
}

#[test]
fn test_validate_api_key() {
    let keys = vec!["abc".to_string(), "longer-key".to_string()];
    assert!(validate_api_key("abc", &keys));
    assert!(validate_api_key("longer-key", &keys));
    assert!(!validate_api_key("abd", &keys));
    assert!(!validate_api_key("ab", &keys));
    assert!(!validate_api_key("", &[]));
}

#[test]
fn test_parse_list() {
    assert_eq!(
        parse_list(" a, b ,,c "),
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
    assert!(parse_list("").is_empty());
}

#[tokio::test]
async fn test_security_headers() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
    assert!(response.headers().contains_key("content-security-policy"));
}

// ========== Transaction API Tests ==========

#[tokio::test]
async fn test_create_and_list_transactions() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "amount": 42.5,
        "date": "2024-03-05",
        "description": "Groceries",
        "category": "Food & Dining",
        "type": "expense"
    });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = get_body_json(response).await;
    assert_eq!(created["amount"], 42.5);
    assert_eq!(created["type"], "expense");
    assert!(created["id"].as_i64().unwrap() > 0);

    let response = app.oneshot(get("/api/transactions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["limit"], 50);
    assert_eq!(json["offset"], 0);
    assert_eq!(json["transactions"][0]["description"], "Groceries");
}

#[tokio::test]
async fn test_list_transactions_clamps_pagination() {
    let (app, db) = setup_test_app_with_db();
    for day in 1..=3 {
        seed_tx(
            &db,
            10.0,
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            "Shopping",
            TransactionType::Expense,
        );
    }

    let response = app
        .clone()
        .oneshot(get("/api/transactions?limit=99999&offset=-5"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["limit"], 1000);
    assert_eq!(json["offset"], 0);
    assert_eq!(json["transactions"].as_array().unwrap().len(), 3);

    let response = app
        .oneshot(get("/api/transactions?limit=0&offset=1"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["limit"], 1);
    assert_eq!(json["total"], 3);
    assert_eq!(json["transactions"][0]["date"], "2024-03-02");
}

#[tokio::test]
async fn test_create_transaction_validation() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "amount": -3,
        "date": "2024-03-05",
        "description": "Negative",
        "category": "Shopping",
        "type": "expense"
    });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("greater than 0"));

    // Unknown type fails deserialization
    let body = serde_json::json!({
        "amount": 3,
        "date": "2024-03-05",
        "description": "Move",
        "category": "Shopping",
        "type": "transfer"
    });
    let response = app
        .oneshot(send_json("POST", "/api/transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_transaction() {
    let (app, db) = setup_test_app_with_db();
    let id = seed_tx(
        &db,
        10.0,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        "Shopping",
        TransactionType::Expense,
    );

    let body = serde_json::json!({
        "amount": 15,
        "date": "2024-03-02",
        "description": "Shoes",
        "category": "Shopping",
        "type": "expense"
    });
    let response = app
        .clone()
        .oneshot(send_json("PUT", &format!("/api/transactions/{}", id), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["amount"], 15.0);
    assert_eq!(json["description"], "Shoes");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/transactions/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/api/transactions/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Transaction not found");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transactions")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Budget API Tests ==========

#[tokio::test]
async fn test_budget_upsert_and_list() {
    let app = setup_test_app();

    for amount in [400, 550] {
        let body = serde_json::json!({
            "category": "Food & Dining",
            "amount": amount,
            "month": "2024-03"
        });
        let response = app
            .clone()
            .oneshot(send_json("POST", "/api/budgets", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(get("/api/budgets?month=2024-03"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let budgets = json.as_array().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0]["amount"], 550.0);

    // A malformed filter matches nothing rather than failing
    let response = app.oneshot(get("/api/budgets?month=2024-3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_budget_invalid_month_rejected() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "category": "Travel",
        "amount": 100,
        "month": "March 2024"
    });
    let response = app
        .oneshot(send_json("POST", "/api/budgets", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Invalid month format. Use YYYY-MM");
}

#[tokio::test]
async fn test_budget_get_update_delete() {
    let (app, db) = setup_test_app_with_db();
    let budget = db
        .upsert_budget(&NewBudget {
            category: "Travel".into(),
            amount: 200.0,
            month: "2024-03".into(),
        })
        .unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/budgets/{}", budget.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({"category": "Travel", "amount": 250, "month": "2024-03"});
    let response = app
        .clone()
        .oneshot(send_json("PUT", &format!("/api/budgets/{}", budget.id), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await["amount"], 250.0);

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/budgets/{}", budget.id))
            .body(Body::empty())
            .unwrap()
    };
    let response = app.clone().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = app.oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_budget_comparison() {
    let (app, db) = setup_test_app_with_db();
    db.upsert_budget(&NewBudget {
        category: "Food & Dining".into(),
        amount: 500.0,
        month: "2024-03".into(),
    })
    .unwrap();
    let march = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
    seed_tx(&db, 250.0, march(1), "Food & Dining", TransactionType::Expense);
    seed_tx(&db, 350.0, march(2), "Food & Dining", TransactionType::Expense);
    seed_tx(&db, 75.0, march(3), "Travel", TransactionType::Expense);

    let response = app
        .oneshot(get("/api/budgets/comparison?month=2024-03"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["month"], "2024-03");
    let comparisons = json["comparisons"].as_array().unwrap();
    assert_eq!(comparisons.len(), 2);
    assert_eq!(comparisons[0]["category"], "Food & Dining");
    assert_eq!(comparisons[0]["percentage"], 120.0);
    assert_eq!(comparisons[0]["status"], "over");
    assert_eq!(comparisons[1]["category"], "Travel");
    assert_eq!(comparisons[1]["budgeted"], 0.0);
    assert_eq!(comparisons[1]["status"], "over");
    assert_eq!(json["summary"]["categories_with_budget"], 1);
    assert_eq!(json["summary"]["categories_over_budget"], 2);
}

#[tokio::test]
async fn test_budget_comparison_requires_month() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(get("/api/budgets/comparison"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Month parameter is required (format: YYYY-MM)");

    let response = app
        .oneshot(get("/api/budgets/comparison?month=2024-3"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Reports, Insights & Catalog ==========

#[tokio::test]
async fn test_monthly_report() {
    let (app, db) = setup_test_app_with_db();
    let today = Local::now().date_naive();
    seed_tx(&db, 3000.0, today, "Salary", TransactionType::Income);
    seed_tx(&db, 120.0, today, "Shopping", TransactionType::Expense);

    let response = app.clone().oneshot(get("/api/reports/monthly")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let months = json.as_array().unwrap();
    assert_eq!(months.len(), 12);
    assert_eq!(months[11]["income"], 3000.0);
    assert_eq!(months[11]["expenses"], 120.0);
    assert_eq!(months[11]["balance"], 2880.0);

    let response = app
        .clone()
        .oneshot(get("/api/reports/monthly?months=3"))
        .await
        .unwrap();
    assert_eq!(get_body_json(response).await.as_array().unwrap().len(), 3);

    let response = app
        .oneshot(get("/api/reports/monthly?months=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_report() {
    let (app, db) = setup_test_app_with_db();
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    seed_tx(&db, 3000.0, day, "Salary", TransactionType::Income);
    seed_tx(&db, 75.0, day, "Shopping", TransactionType::Expense);
    seed_tx(&db, 25.0, day, "Food & Dining", TransactionType::Expense);

    let response = app
        .clone()
        .oneshot(get("/api/reports/categories"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let totals = json.as_array().unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0]["category"], "Shopping");
    assert_eq!(totals[0]["percentage"], 75.0);
    assert_eq!(totals[0]["color"], "#45B7D1");

    let response = app
        .clone()
        .oneshot(get("/api/reports/categories?type=income"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json[0]["category"], "Salary");
    assert_eq!(json[0]["percentage"], 100.0);

    let response = app
        .oneshot(get("/api/reports/categories?type=transfer"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard() {
    let (app, db) = setup_test_app_with_db();
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    seed_tx(&db, 1000.0, day, "Salary", TransactionType::Income);
    seed_tx(&db, 400.0, day, "Travel", TransactionType::Expense);

    let response = app.oneshot(get("/api/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total_income"], 1000.0);
    assert_eq!(json["total_expenses"], 400.0);
    assert_eq!(json["balance"], 600.0);
    assert_eq!(json["transaction_count"], 2);
    assert_eq!(json["top_categories"][0]["category"], "Travel");
    assert_eq!(json["top_categories"][0]["percentage"], 100.0);
}

#[tokio::test]
async fn test_insights_fallback_tip() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/insights")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let insights = json.as_array().unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0]["type"], "tip");
    assert_eq!(insights[0]["title"], "Track Your Progress");
}

#[tokio::test]
async fn test_insights_current_month() {
    let (app, db) = setup_test_app_with_db();
    let today = Local::now().date_naive();
    seed_tx(&db, 500.0, today, "Travel", TransactionType::Expense);

    let response = app.oneshot(get("/api/insights")).await.unwrap();
    let json = get_body_json(response).await;
    let insights = json.as_array().unwrap();
    assert!(insights.len() <= 4);
    assert!(insights
        .iter()
        .any(|i| i["title"] == "High Category Concentration"));
}

#[tokio::test]
async fn test_categories_catalog() {
    let app = setup_test_app();

    let response = app.clone().oneshot(get("/api/categories")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 20);

    let response = app
        .clone()
        .oneshot(get("/api/categories?type=income"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let income = json.as_array().unwrap();
    assert_eq!(income.len(), 6);
    assert!(income.iter().all(|c| c["type"] == "income"));

    let response = app
        .oneshot(get("/api/categories?type=nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_records_is_not_found() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "amount": 10.0,
        "date": "2024-03-01",
        "description": "Lunch",
        "category": "Food & Dining",
        "type": "expense"
    });
    let response = app
        .clone()
        .oneshot(send_json("PUT", "/api/transactions/999", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(get_body_json(response).await["error"], "Transaction not found");

    let body = serde_json::json!({"category": "Travel", "amount": 100, "month": "2024-03"});
    let response = app
        .oneshot(send_json("PUT", "/api/budgets/999", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(get_body_json(response).await["error"], "Budget not found");
}

// ========== Error mapping ==========

#[test]
fn test_core_errors_map_to_status() {
    let err: AppError = tally_core::Error::invalid_input("bad month").into();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err: AppError = tally_core::Error::NotFound("budget 3".into()).into();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
