//! Shared test helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use chrono::{Duration, NaiveDate, NaiveTime};
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use parish_api::{AppState, Stores, build_app};
use parish_core::config::AppConfig;
use parish_core::traits::{Clock, FixedClock};
use parish_database::{MassTypeStore, MemoryStore, SlotStore};
use parish_entity::{CreateMassType, CreateSlot, DayType, Price};
use parish_service::LogNotifier;

/// Token configured by [`TestApp::with_admin_token`].
pub const ADMIN_TOKEN: &str = "staff-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct seeding
    pub store: Arc<MemoryStore>,
    /// Frozen clock shared with the services
    pub clock: Arc<FixedClock>,
    /// Token sent by [`TestApp::admin`]
    pub admin_token: Option<String>,
}

/// Status and decoded JSON body of a response.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Application with open admin routes.
    pub fn new() -> Self {
        Self::build("")
    }

    /// Application whose admin routes require [`ADMIN_TOKEN`].
    pub fn with_admin_token() -> Self {
        Self::build(ADMIN_TOKEN)
    }

    fn build(token: &str) -> Self {
        let config = AppConfig::from_toml(&format!(
            r#"
            [database]
            url = "postgres://unused@localhost/parish"

            [admin]
            api_token = "{token}"
            "#
        ))
        .expect("test config");

        let store = Arc::new(MemoryStore::new());
        let today = NaiveDate::from_ymd_opt(2030, 6, 5).expect("valid date");
        let clock = Arc::new(FixedClock::at_date(today));

        let state = AppState::new(
            config,
            None,
            Stores::memory(store.clone()),
            clock.clone(),
            Arc::new(LogNotifier),
        );

        Self {
            router: build_app(state),
            store,
            clock,
            admin_token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    /// The clock's current date.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The day after [`TestApp::today`].
    pub fn tomorrow(&self) -> NaiveDate {
        self.today() + Duration::days(1)
    }

    /// Offer `time` on the day-type of [`TestApp::tomorrow`].
    pub async fn add_slot(&self, time: &str, capacity: i32) {
        self.store
            .create_slot(CreateSlot {
                day_type: DayType::for_date(self.tomorrow()),
                time_of_day: NaiveTime::parse_from_str(time, "%H:%M").expect("valid time"),
                location: "Main church".to_string(),
                capacity,
                display_order: 1,
                active: true,
            })
            .await
            .expect("seed slot");
    }

    /// Add an active mass type.
    pub async fn add_mass_type(&self, code: &str, cents: i64) {
        self.store
            .create_mass_type(CreateMassType {
                code: code.to_string(),
                name: code.replace('_', " "),
                description: None,
                price: Price::from_cents(cents).expect("price"),
                active: true,
                display_order: 1,
            })
            .await
            .expect("seed mass type");
    }

    /// Tomorrow at 09:00, capacity `capacity`, with the `difuntos` type at 35.00.
    pub async fn seeded(capacity: i32) -> Self {
        let app = Self::new();
        app.add_slot("09:00", capacity).await;
        app.add_mass_type("difuntos", 3500).await;
        app
    }

    /// A complete booking body for tomorrow.
    pub fn booking(&self, time: &str, payment_method: &str) -> Value {
        json!({
            "date": self.tomorrow().to_string(),
            "time": time,
            "firstName": "María",
            "lastName": "Quispe",
            "nationalId": "12345678",
            "phone": "987654321",
            "email": "maria@example.pe",
            "massTypeCode": "difuntos",
            "intention": "For the eternal rest of Juan Quispe",
            "deceasedNames": "Juan Quispe",
            "paymentMethod": payment_method,
        })
    }

    /// Send a request without credentials.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.send(method, path, body.map(|b| b.to_string()), None)
            .await
    }

    /// Send a request with the configured admin token, if any.
    pub async fn admin(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let token = self.admin_token.clone();
        self.send(method, path, body.map(|b| b.to_string()), token.as_deref())
            .await
    }

    /// Send a raw request.
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header("x-forwarded-for", "203.0.113.10")
            .header("user-agent", "parish-tests");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(raw) => {
                builder = builder.header("content-type", "application/json");
                Body::from(raw)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }

    /// Book tomorrow at 09:00 and return the response body.
    pub async fn book(&self, payment_method: &str) -> Value {
        let response = self
            .request("POST", "/api/reservations", Some(self.booking("09:00", payment_method)))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body
    }
}
