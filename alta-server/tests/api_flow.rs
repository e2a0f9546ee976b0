//! End-to-end API tests over the in-memory store

use alta_server::store::{DocumentStore, MemoryStore, collections};
use alta_server::{AppState, Config, api};
use axum::Router;
use axum::body::Body;
use chrono::{TimeZone, Utc};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_store(store.clone(), Config::default());
        Self {
            store,
            router: api::build_app(state),
        }
    }

    async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(body)).await
    }

    async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::PUT, uri, Some(body)).await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::DELETE, uri, None).await
    }
}

/// Noon in Asunción on 2024-01-05
fn jan_5() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 5, 15, 0, 0).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "alta-server");
}

#[tokio::test]
async fn test_daily_breakdown_example_day() {
    let app = TestApp::new();
    for (kind, currency, amount) in [("Ingreso", "PESO", 1000), ("Egreso", "PESO", 300)] {
        let (status, _) = app
            .post(
                "/api/cash-transactions",
                json!({"type": kind, "currency": currency, "amount": amount, "time": jan_5()}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }
    app.store
        .set(
            collections::SALES,
            "sale123",
            json!({"total": 50, "currency": "USD", "date": jan_5(), "paymentMethod": "cash"}),
        )
        .await
        .unwrap();

    let (status, day) = app.get("/api/balances/2024-01-05").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(day["transactions"].as_array().unwrap().len(), 3);
    assert_eq!(
        day["breakdown"]["PESO"],
        json!({"income": 1000.0, "expense": 300.0, "balance": 700.0})
    );
    assert_eq!(
        day["breakdown"]["USD"],
        json!({"income": 50.0, "expense": 0.0, "balance": 50.0})
    );
    for currency in ["USDT", "PESO_TRANSFERENCIA", "REAL", "GUARANI"] {
        assert_eq!(day["breakdown"][currency]["balance"], 0.0);
    }

    // Another day is empty but still carries every currency
    let (status, other) = app.get("/api/balances/2024-01-06").await;
    assert_eq!(status, StatusCode::OK);
    assert!(other["transactions"].as_array().unwrap().is_empty());
    assert_eq!(other["breakdown"].as_object().unwrap().len(), 6);
}

#[tokio::test]
async fn test_bad_date_is_rejected() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/balances/05-01-2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("05-01-2024"));
}

#[tokio::test]
async fn test_coordinated_delete_removes_sale() {
    let app = TestApp::new();
    app.store
        .set(
            collections::SALES,
            "sale123",
            json!({"total": 50, "currency": "USD", "date": jan_5()}),
        )
        .await
        .unwrap();

    let (status, day) = app
        .delete("/api/balances/2024-01-05/transactions/sale123")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(day["transactions"].as_array().unwrap().is_empty());
    assert_eq!(day["breakdown"]["USD"]["income"], 0.0);
    assert!(
        app.store
            .get(collections::SALES, "sale123")
            .await
            .unwrap()
            .is_none()
    );

    let (status, body) = app
        .delete("/api/balances/2024-01-05/transactions/sale123")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_delete_of_referenced_ledger_row_matches_reload() {
    let app = TestApp::new();
    app.store
        .set(collections::SALES, "s1", json!({"total": 20, "date": jan_5()}))
        .await
        .unwrap();
    app.store
        .set(
            collections::CASH_TRANSACTIONS,
            "row1",
            json!({"type": "Venta", "amount": 20, "reference": "s1", "time": jan_5()}),
        )
        .await
        .unwrap();

    let (status, after_delete) = app
        .delete("/api/balances/2024-01-05/transactions/row1")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.store.get(collections::SALES, "s1").await.unwrap().is_none());

    let (_, reload) = app.get("/api/balances/2024-01-05").await;
    assert_eq!(after_delete, reload);
    assert_eq!(reload["transactions"][0]["id"], "row1");
    assert_eq!(reload["breakdown"]["USD"]["income"], 20.0);
}

#[tokio::test]
async fn test_manual_transaction_validation_and_delete() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/api/cash-transactions", json!({"type": "Ingreso", "amount": 0}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);

    let (_, tx) = app
        .post("/api/cash-transactions", json!({"type": "Ingreso", "amount": 5}))
        .await;
    let uri = format!("/api/cash-transactions/{}", tx["id"].as_str().unwrap());
    assert_eq!(app.delete(&uri).await, (StatusCode::OK, json!(true)));
    assert_eq!(app.delete(&uri).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_numbers_are_integers() {
    let app = TestApp::new();
    app.post("/api/products", json!({"name": "Cargador", "price": 10.25, "quantity": 3}))
        .await;
    app.post(
        "/api/cash-transactions",
        json!({"type": "Ingreso", "amount": 100.5, "isDebt": true, "receivable": 20.5}),
    )
    .await;
    app.store
        .set(
            collections::SALES,
            "s1",
            json!({"total": 19.99, "paymentMethod": "card", "date": Utc::now()}),
        )
        .await
        .unwrap();

    let (status, body) = app.get("/api/dashboard/stats").await;
    assert_eq!(status, StatusCode::OK);
    let stats = &body["stats"];
    assert_eq!(stats["totalProductValue"], 31);
    assert_eq!(stats["cashIncome"], 101);
    assert_eq!(stats["totalDebt"], 21);
    assert_eq!(stats["totalSalesRevenue"], 20);
    assert!(stats["netCashFlow"].is_i64());
    assert_eq!(body["charts"]["salesByDay"].as_array().unwrap().len(), 30);
    assert_eq!(body["charts"]["financialByMonth"].as_array().unwrap().len(), 6);
    assert_eq!(body["charts"]["paymentMethodsData"][0]["name"], "Tarjeta");
}

#[tokio::test]
async fn test_dashboard_fails_whole_on_corrupt_document() {
    let app = TestApp::new();
    app.store
        .set(collections::STOCK, "bad", json!({"quantity": "many"}))
        .await
        .unwrap();
    let (status, body) = app.get("/api/dashboard/stats").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("stats").is_none());
}

#[tokio::test]
async fn test_dashboard_overflow_is_internal_error() {
    let app = TestApp::new();
    let (status, _) = app
        .post("/api/products", json!({"name": "Lote", "price": 7.0e28, "quantity": 1000}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/api/dashboard/stats").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("stats").is_none());
}

#[tokio::test]
async fn test_closing_freezes_balance_and_tags_rows() {
    let app = TestApp::new();
    app.post(
        "/api/cash-transactions",
        json!({"type": "Ingreso", "currency": "PESO", "amount": 500}),
    )
    .await;
    app.post(
        "/api/cash-transactions",
        json!({"type": "Egreso", "currency": "PESO", "amount": 120}),
    )
    .await;

    let (_, balance) = app.get("/api/cash-balance").await;
    assert_eq!(balance["PESO"]["balance"], 380.0);

    let (status, closing) = app
        .post(
            "/api/cash-closings",
            json!({"user": "Caja 1", "currency": "PESO", "actual": 370}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closing["status"], "Faltante");
    assert_eq!(closing["difference"], -10.0);
    assert_eq!(closing["balance"]["PESO"]["balance"], 380.0);

    let (_, balance) = app.get("/api/cash-balance").await;
    assert_eq!(balance["PESO"]["balance"], 0.0);

    let (_, closings) = app.get("/api/cash-closings").await;
    assert_eq!(closings.as_array().unwrap().len(), 1);
    assert_eq!(closings[0]["id"], closing["id"]);
}

#[tokio::test]
async fn test_loyalty_grant_is_all_or_nothing() {
    let app = TestApp::new();
    for (id, points) in [("c1", 10), ("c2", 0)] {
        app.store
            .set(collections::CLIENTS, id, json!({"name": id, "points": points}))
            .await
            .unwrap();
    }

    let (status, body) = app
        .post(
            "/api/clients/loyalty/grant",
            json!({"clientIds": ["c1", "ghost"], "points": 5}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7001);
    let (_, clients) = app.get("/api/clients").await;
    assert_eq!(clients[0]["points"], 10);

    let (status, updated) = app
        .post(
            "/api/clients/loyalty/grant",
            json!({"clientIds": ["c1", "c2"], "points": 5}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated.as_array().unwrap().len(), 2);
    let (_, clients) = app.get("/api/clients").await;
    assert_eq!(clients[0]["points"], 15);
    assert_eq!(clients[1]["points"], 5);
}

#[tokio::test]
async fn test_featured_cached_until_product_write() {
    let app = TestApp::new();
    let (_, first) = app
        .post(
            "/api/products",
            json!({"name": "Funda", "price": 5, "liquidation": true}),
        )
        .await;

    let (status, featured) = app.get("/api/featured").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(featured["liquidation"].as_array().unwrap().len(), 1);

    // Written behind the API's back: the cached snapshot still answers
    app.store
        .set(
            collections::STOCK,
            "direct",
            json!({"name": "Directo", "liquidation": true, "updatedAt": Utc::now()}),
        )
        .await
        .unwrap();
    let (_, featured) = app.get("/api/featured").await;
    assert_eq!(featured["liquidation"].as_array().unwrap().len(), 1);

    // A product write invalidates the snapshot
    let uri = format!("/api/products/{}", first["id"].as_str().unwrap());
    let (status, _) = app.put(&uri, json!({"weeklyOffer": true})).await;
    assert_eq!(status, StatusCode::OK);
    let (_, featured) = app.get("/api/featured?limit=1").await;
    assert_eq!(featured["liquidation"].as_array().unwrap().len(), 1);
    assert_eq!(featured["weekly"][0]["name"], "Funda");
    let (_, featured) = app.get("/api/featured").await;
    assert_eq!(featured["liquidation"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_product_errors() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/products/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);

    let (status, body) = app
        .post("/api/products", json!({"name": "X", "price": -1}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);

    assert_eq!(app.delete("/api/products/nope").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_flyers_round_trip() {
    let app = TestApp::new();
    let (status, empty) = app.get("/api/flyers").await;
    assert_eq!(status, StatusCode::OK);
    assert!(empty["banners"].as_array().unwrap().is_empty());

    let (status, saved) = app
        .put(
            "/api/flyers",
            json!({"banners": [{"id": "b1", "title": "Promo", "imageUrl": "/a.png", "active": true}]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(saved["updatedAt"].is_string());

    let (_, read) = app.get("/api/flyers").await;
    assert_eq!(read["banners"][0]["title"], "Promo");
}
