//! End-to-end API tests
//!
//! Drives the full router (auth gate, middleware, handlers, repositories)
//! in-process against an embedded RocksDB store in a temp directory.
//! Run: cargo test -p restaurant-server --test api_test

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{Duration, SecondsFormat, Utc};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tower::ServiceExt;

use restaurant_server::api::build_app;
use restaurant_server::auth::{JwtConfig, JwtService};
use restaurant_server::core::{Config, ServerState};
use restaurant_server::db::DbService;

const SECRET: &str = "integration-test-secret-long-enough-for-hs256";

struct TestApp {
    app: Router,
    _dir: tempfile::TempDir,
}

async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(dir.path().join("restaurant.db"))
        .await
        .unwrap();
    let service = DbService::with_db(db).await.unwrap();

    let jwt = JwtConfig::with_secret(SECRET);
    let config = Config {
        work_dir: dir.path().display().to_string(),
        http_port: 0,
        jwt: jwt.clone(),
        environment: "test".into(),
        request_timeout_ms: 100_000,
        shutdown_timeout_ms: 1_000,
        cors_allowed_origin: "http://localhost:5173".into(),
    };
    let state = ServerState::new(config, service.db, Arc::new(JwtService::with_config(jwt)));

    TestApp {
        app: build_app(&state),
        _dir: dir,
    }
}

impl TestApp {
    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn call(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }

    async fn signup(&self, email: &str, phone: &str) -> (StatusCode, Value) {
        self.call(
            "POST",
            "/users/signup",
            None,
            Some(json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "password": "secret123",
                "email": email,
                "phone": phone,
            })),
        )
        .await
    }

    /// Sign up a fresh user and return its access token
    async fn token(&self) -> String {
        let (status, user) = self.signup("staff@example.com", "555-0100").await;
        assert_eq!(status, StatusCode::OK, "signup failed: {user}");
        user["token"].as_str().unwrap().to_string()
    }

    async fn create(&self, token: &str, uri: &str, body: Value) -> Value {
        let (status, created) = self.call("POST", uri, Some(token), Some(body)).await;
        assert_eq!(status, StatusCode::OK, "POST {uri} failed: {created}");
        created
    }
}

fn rfc3339(ts: chrono::DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[tokio::test]
async fn test_health_is_public() {
    let app = spawn_app().await;
    let (status, body) = app.call("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_signup_and_login() {
    let app = spawn_app().await;

    let (status, user) = app.signup("ada@example.com", "555-0001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["user_id"].as_str().unwrap().len(), 32);
    assert!(!user["token"].as_str().unwrap().is_empty());
    assert!(!user["refresh_token"].as_str().unwrap().is_empty());
    assert!(user.get("password").is_none());

    let (status, logged_in) = app
        .call(
            "POST",
            "/users/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "secret123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["user_id"], user["user_id"]);
    assert_ne!(logged_in["refresh_token"], user["refresh_token"]);

    let (wrong_status, wrong) = app
        .call(
            "POST",
            "/users/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "not-the-password" })),
        )
        .await;
    let (unknown_status, unknown) = app
        .call(
            "POST",
            "/users/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "secret123" })),
        )
        .await;
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong["error"], "login or password is incorrect");
    assert_eq!(wrong["error"], unknown["error"]);
}

#[tokio::test]
async fn test_duplicate_signup_rejected() {
    let app = spawn_app().await;
    let (status, user) = app.signup("ada@example.com", "555-0001").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.signup("ada@example.com", "555-0002").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "this email or phone number already exists");

    let (status, _) = app.signup("other@example.com", "555-0001").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let token = user["token"].as_str().unwrap();
    let (status, users) = app.call("GET", "/users", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users["total_count"], 1);
}

#[tokio::test]
async fn test_signup_validation() {
    let app = spawn_app().await;
    let (status, body) = app
        .call(
            "POST",
            "/users/signup",
            None,
            Some(json!({
                "first_name": "A",
                "last_name": "Lovelace",
                "password": "secret123",
                "email": "ada@example.com",
                "phone": "555",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "first_name: length must be between 2 and 100");

    let req = Request::builder()
        .method("POST")
        .uri("/users/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_auth_gate() {
    let app = spawn_app().await;
    let (_, user) = app.signup("ada@example.com", "555-0001").await;

    let (status, body) = app.call("GET", "/menus", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = app.call("GET", "/menus", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let refresh = user["refresh_token"].as_str().unwrap();
    let (status, _) = app.call("GET", "/menus", Some(refresh), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Raw `token` header from older clients
    let req = Request::builder()
        .uri("/menus")
        .header("token", user["token"].as_str().unwrap())
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(req).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rotation() {
    let app = spawn_app().await;
    let (_, user) = app.signup("ada@example.com", "555-0001").await;
    let old_refresh = user["refresh_token"].as_str().unwrap().to_string();

    let (status, rotated) = app
        .call(
            "POST",
            "/users/refresh",
            None,
            Some(json!({ "refresh_token": old_refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let new_refresh = rotated["refresh_token"].as_str().unwrap();
    assert_ne!(new_refresh, old_refresh);

    let (status, _) = app
        .call(
            "POST",
            "/users/refresh",
            None,
            Some(json!({ "refresh_token": old_refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .call(
            "POST",
            "/users/refresh",
            None,
            Some(json!({ "refresh_token": rotated["token"] })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .call("GET", "/menus", Some(rotated["token"].as_str().unwrap()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_menu_create_fetch_and_paginate() {
    let app = spawn_app().await;
    let token = app.token().await;

    let first = app
        .create(&token, "/menus", json!({ "name": "Menu 0", "category": "Lunch" }))
        .await;
    for i in 1..12 {
        app.create(&token, "/menus", json!({ "name": format!("Menu {i}"), "category": "Lunch" }))
            .await;
    }

    let id = first["menu_id"].as_str().unwrap();
    let (status, fetched) = app.call("GET", &format!("/menus/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Menu 0");
    assert_eq!(fetched["category"], "Lunch");
    assert_eq!(fetched["created_at"], first["created_at"]);

    let (status, page) = app.call("GET", "/menus", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_count"], 12);
    assert_eq!(page["items"].as_array().unwrap().len(), 10);
    assert_eq!(page["items"][0]["menu_id"], first["menu_id"]);

    let (_, page) = app.call("GET", "/menus?page=2", Some(&token), None).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 2);

    let (_, page) = app
        .call("GET", "/menus?startIndex=11&recordPerPage=5", Some(&token), None)
        .await;
    assert_eq!(page["items"].as_array().unwrap().len(), 1);

    let (_, page) = app.call("GET", "/menus?page=abc&record_per_page=0", Some(&token), None).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 10);

    let (status, _) = app
        .call("GET", "/menus?page=2&start_index=3", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.call("GET", "/menus/missing", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "menu was not found");
}

#[tokio::test]
async fn test_menu_window_update() {
    let app = spawn_app().await;
    let token = app.token().await;
    let menu = app
        .create(&token, "/menus", json!({ "name": "Brunch", "category": "Weekend" }))
        .await;
    let uri = format!("/menus/{}", menu["menu_id"].as_str().unwrap());
    let now = Utc::now();

    let (status, body) = app
        .call(
            "PATCH",
            &uri,
            Some(&token),
            Some(json!({
                "start_date": rfc3339(now + Duration::days(1)),
                "end_date": rfc3339(now + Duration::days(2)),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Kindly retype the time");

    let (status, updated) = app
        .call(
            "PATCH",
            &uri,
            Some(&token),
            Some(json!({
                "name": "",
                "start_date": rfc3339(now - Duration::hours(1)),
                "end_date": rfc3339(now + Duration::hours(1)),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Brunch");
    assert!(updated["start_date"].is_string());
    assert!(updated["end_date"].is_string());
    assert_eq!(updated["created_at"], menu["created_at"]);
    assert_ne!(updated["updated_at"], menu["updated_at"]);
}

#[tokio::test]
async fn test_update_missing_and_upsert() {
    let app = spawn_app().await;
    let token = app.token().await;

    let (status, _) = app
        .call(
            "PATCH",
            "/tables/t-missing",
            Some(&token),
            Some(json!({ "table_number": 7 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, created) = app
        .call(
            "PATCH",
            "/tables/t-missing?upsert=true",
            Some(&token),
            Some(json!({ "table_number": 7, "number_of_guests": 4 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["table_id"], "t-missing");
    assert_eq!(created["table_number"], 7);
    assert!(created["created_at"].is_string());

    let (status, upserted) = app
        .call(
            "PATCH",
            "/tables/t-missing?upsert=true",
            Some(&token),
            Some(json!({ "number_of_guests": 6 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(upserted["table_number"], 7);
    assert_eq!(upserted["number_of_guests"], 6);
    assert_eq!(upserted["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_upsert_of_missing_document_follows_create_rules() {
    let app = spawn_app().await;
    let token = app.token().await;
    let menu = app
        .create(&token, "/menus", json!({ "name": "Dinner", "category": "Main" }))
        .await;

    // Food: incomplete patch, then an unknown menu; neither persists anything
    let (status, body) = app
        .call("PATCH", "/foods/f-new?upsert=true", Some(&token), Some(json!({ "price": 2 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["code"], 2);

    let (status, body) = app
        .call(
            "PATCH",
            "/foods/f-new?upsert=true",
            Some(&token),
            Some(json!({ "name": "Soup", "price": 2.005, "food_image": "soup.png", "menu_id": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "menu was not found");

    let (_, foods) = app.call("GET", "/foods", Some(&token), None).await;
    assert_eq!(foods["total_count"], 0);
    let (status, _) = app.call("GET", "/foods/f-new", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, food) = app
        .call(
            "PATCH",
            "/foods/f-new?upsert=true",
            Some(&token),
            Some(json!({ "name": "Soup", "price": 2.005, "food_image": "soup.png", "menu_id": menu["menu_id"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{food}");
    assert_eq!(food["food_id"], "f-new");
    assert_eq!(food["menu_id"], menu["menu_id"]);
    assert_eq!(food["price"], 2.01);

    // Invoice: needs an existing order and gets the creation defaults
    let (status, _) = app
        .call(
            "PATCH",
            "/invoices/i-new?upsert=true",
            Some(&token),
            Some(json!({ "payment_method": "CASH" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .call(
            "PATCH",
            "/invoices/i-new?upsert=true",
            Some(&token),
            Some(json!({ "payment_method": "CASH", "order_id": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "order was not found");

    let (_, invoices) = app.call("GET", "/invoices", Some(&token), None).await;
    assert_eq!(invoices["total_count"], 0);

    let order = app.create(&token, "/orders", json!({})).await;
    let before = Utc::now();
    let (status, invoice) = app
        .call(
            "PATCH",
            "/invoices/i-new?upsert=true",
            Some(&token),
            Some(json!({ "payment_method": "CASH", "order_id": order["order_id"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{invoice}");
    assert_eq!(invoice["invoice_id"], "i-new");
    assert_eq!(invoice["payment_status"], "PENDING");
    let due = chrono::DateTime::parse_from_rfc3339(invoice["payment_due_date"].as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc);
    assert!(due > before + Duration::hours(23), "due date {due}");

    // Order item: references must be supplied and resolve
    let (status, _) = app
        .call(
            "PATCH",
            "/order-items/oi-new?upsert=true",
            Some(&token),
            Some(json!({ "quantity": "S" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call(
            "PATCH",
            "/order-items/oi-new?upsert=true",
            Some(&token),
            Some(json!({ "order_id": order["order_id"], "food_id": "nope", "quantity": "S", "unit_price": 1.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, items) = app.call("GET", "/order-items", Some(&token), None).await;
    assert_eq!(items["total_count"], 0);

    // Order: an unknown table is rejected before anything is written
    let (status, _) = app
        .call(
            "PATCH",
            "/orders/o-new?upsert=true",
            Some(&token),
            Some(json!({ "table_id": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, orders) = app.call("GET", "/orders", Some(&token), None).await;
    assert_eq!(orders["total_count"], 1);
}

#[tokio::test]
async fn test_food_price_rounding_and_menu_reference() {
    let app = spawn_app().await;
    let token = app.token().await;
    let menu = app
        .create(&token, "/menus", json!({ "name": "Dinner", "category": "Main" }))
        .await;

    let food = app
        .create(
            &token,
            "/foods",
            json!({
                "name": "Soup",
                "price": 9.995,
                "food_image": "soup.png",
                "menu_id": menu["menu_id"],
            }),
        )
        .await;
    assert_eq!(food["price"].as_f64(), Some(10.0));

    let refund = app
        .create(
            &token,
            "/foods",
            json!({
                "name": "Refund",
                "price": -9.995,
                "food_image": "refund.png",
                "menu_id": menu["menu_id"],
            }),
        )
        .await;
    assert_eq!(refund["price"].as_f64(), Some(-10.0));

    let (status, body) = app
        .call(
            "POST",
            "/foods",
            Some(&token),
            Some(json!({
                "name": "Ghost",
                "price": 1.0,
                "food_image": "ghost.png",
                "menu_id": "no-such-menu",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "menu was not found");

    let (_, page) = app.call("GET", "/foods", Some(&token), None).await;
    assert_eq!(page["total_count"], 2);

    let uri = format!("/foods/{}", food["food_id"].as_str().unwrap());
    let (status, updated) = app
        .call("PATCH", &uri, Some(&token), Some(json!({ "price": 3.14159 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"].as_f64(), Some(3.14));
    assert_eq!(updated["name"], "Soup");

    let (status, _) = app
        .call("PATCH", &uri, Some(&token), Some(json!({ "menu_id": "no-such-menu" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_references() {
    let app = spawn_app().await;
    let token = app.token().await;

    let (status, body) = app
        .call("POST", "/orders", Some(&token), Some(json!({ "table_id": "nope" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "table was not found");

    let takeaway = app.create(&token, "/orders", json!({})).await;
    assert!(takeaway["table_id"].is_null());
    assert!(takeaway["order_date"].is_string());

    let (status, body) = app
        .call(
            "POST",
            "/order-items",
            Some(&token),
            Some(json!({
                "order_id": takeaway["order_id"],
                "food_id": "nope",
                "quantity": "S",
                "unit_price": 1.0,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "food was not found");
}

#[tokio::test]
async fn test_invoice_view_and_order_summary() {
    let app = spawn_app().await;
    let token = app.token().await;

    let menu = app
        .create(&token, "/menus", json!({ "name": "Dinner", "category": "Main" }))
        .await;
    let soup = app
        .create(
            &token,
            "/foods",
            json!({ "name": "Soup", "price": 10.0, "food_image": "soup.png", "menu_id": menu["menu_id"] }),
        )
        .await;
    let tea = app
        .create(
            &token,
            "/foods",
            json!({ "name": "Tea", "price": 2.5, "food_image": "tea.png", "menu_id": menu["menu_id"] }),
        )
        .await;
    let table = app
        .create(&token, "/tables", json!({ "number_of_guests": 2, "table_number": 12 }))
        .await;

    let (status, batch) = app
        .call(
            "POST",
            "/order-items/batch",
            Some(&token),
            Some(json!({
                "table_id": table["table_id"],
                "order_items": [
                    { "food_id": soup["food_id"], "quantity": "M", "unit_price": 10.0 },
                    { "food_id": tea["food_id"], "quantity": "S", "unit_price": 2.5 },
                ],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(batch["order_items"].as_array().unwrap().len(), 2);
    let order_id = batch["order_id"].as_str().unwrap();

    let (status, summaries) = app
        .call("GET", &format!("/order-items-order/{order_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let summaries = summaries.as_array().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["total_count"], 2);
    assert_eq!(summaries[0]["table_number"], 12);
    assert_eq!(summaries[0]["payment_due"].as_f64(), Some(12.5));

    let invoice = app
        .create(&token, "/invoices", json!({ "order_id": order_id, "payment_method": "CARD" }))
        .await;
    assert_eq!(invoice["payment_status"], "PENDING");

    let uri = format!("/invoices/{}", invoice["invoice_id"].as_str().unwrap());
    let (status, view) = app.call("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["payment_due"].as_f64(), Some(12.5));
    assert_eq!(view["table_number"], 12);
    assert_eq!(view["order_details"].as_array().unwrap().len(), 2);
    assert_eq!(view["order_details"][0]["food_name"], "Soup");

    let (status, paid) = app
        .call("PATCH", &uri, Some(&token), Some(json!({ "payment_status": "PAID" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["payment_status"], "PAID");
    assert_eq!(paid["payment_method"], "CARD");

    // An order without items has nothing to summarize
    let empty = app.create(&token, "/orders", json!({})).await;
    let bare = app
        .create(&token, "/invoices", json!({ "order_id": empty["order_id"] }))
        .await;
    let (_, view) = app
        .call(
            "GET",
            &format!("/invoices/{}", bare["invoice_id"].as_str().unwrap()),
            Some(&token),
            None,
        )
        .await;
    assert!(view.get("payment_due").is_none());
    assert!(view.get("order_details").is_none());

    let (status, body) = app
        .call("POST", "/invoices", Some(&token), Some(json!({ "order_id": "nope" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "order was not found");
}

#[tokio::test]
async fn test_order_item_validation() {
    let app = spawn_app().await;
    let token = app.token().await;

    let (status, body) = app
        .call(
            "POST",
            "/order-items",
            Some(&token),
            Some(json!({ "order_id": "o1", "food_id": "f1", "quantity": "XL", "unit_price": 1.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "quantity: must be one of S|M|L");
    assert_eq!(body["code"], 2);

    let (status, body) = app
        .call("POST", "/order-items/batch", Some(&token), Some(json!({ "order_items": [] })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4007);
}

#[tokio::test]
async fn test_request_id_propagated() {
    let app = spawn_app().await;
    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app.app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-123");
}
