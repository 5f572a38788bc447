//! Integration tests for the staff endpoints.

mod helpers;

use chrono::{DateTime, Duration, Utc};
use http::StatusCode;
use serde_json::json;

use parish_core::traits::Clock;

use helpers::{ADMIN_TOKEN, TestApp};

#[tokio::test]
async fn test_admin_token_is_enforced() {
    let app = TestApp::with_admin_token();

    let response = app.request("GET", "/api/admin/reservations", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["code"], "UNAUTHORIZED");

    let response = app
        .send("GET", "/api/admin/reservations", None, Some("wrong"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Invalid admin token");

    let response = app
        .send("GET", "/api/admin/reservations", None, Some(ADMIN_TOKEN))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_confirm_sets_confirmed_at_only() {
    let app = TestApp::seeded(3).await;
    let created = app.book("cash").await;
    let id = created["reservationId"].as_str().expect("id").to_string();

    let before = app
        .admin("GET", &format!("/api/admin/reservations/{id}"), None)
        .await;
    assert_eq!(before.status, StatusCode::OK);
    assert!(before.body["data"]["confirmedAt"].is_null());
    assert_eq!(before.body["data"]["clientIp"], "203.0.113.10");

    app.clock.advance(Duration::minutes(10));
    let response = app
        .admin(
            "PUT",
            &format!("/api/admin/reservations/{id}"),
            Some(json!({ "status": "confirmed" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);

    let after = &response.body["data"];
    assert_eq!(after["status"], "confirmed");
    let confirmed_at: DateTime<Utc> = after["confirmedAt"]
        .as_str()
        .expect("confirmedAt")
        .parse()
        .expect("timestamp");
    assert_eq!(confirmed_at, app.clock.now());

    let before = &before.body["data"];
    for field in [
        "paymentVerified",
        "adminNotes",
        "confirmedBy",
        "intention",
        "price",
        "confirmationCode",
        "createdAt",
    ] {
        assert_eq!(after[field], before[field], "{field}");
    }
}

#[tokio::test]
async fn test_update_rejections() {
    let app = TestApp::seeded(3).await;
    let created = app.book("cash").await;
    let id = created["reservationId"].as_str().expect("id").to_string();
    let path = format!("/api/admin/reservations/{id}");

    let response = app.admin("PUT", &path, Some(json!({}))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "No fields to update");

    let response = app
        .admin("PUT", &path, Some(json!({ "status": "archived" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .admin(
            "PUT",
            "/api/admin/reservations/00000000-0000-4000-8000-000000000000",
            Some(json!({ "status": "cancelled" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .admin("PUT", "/api/admin/reservations/42", Some(json!({ "status": "cancelled" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .admin("PUT", &path, Some(json!({ "status": "cancelled" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .admin("PUT", &path, Some(json!({ "status": "confirmed" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "Cannot change status from cancelled to confirmed"
    );
}

#[tokio::test]
async fn test_cancel_frees_the_seat() {
    let app = TestApp::seeded(1).await;
    let created = app.book("cash").await;
    let id = created["reservationId"].as_str().expect("id").to_string();

    let response = app
        .request("POST", "/api/reservations", Some(app.booking("09:00", "cash")))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .admin(
            "PUT",
            &format!("/api/admin/reservations/{id}"),
            Some(json!({ "status": "cancelled", "adminNotes": "Family called" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["adminNotes"], "Family called");

    app.book("cash").await;
}

#[tokio::test]
async fn test_delete_reservation() {
    let app = TestApp::seeded(3).await;
    let created = app.book("yape").await;
    let id = created["reservationId"].as_str().expect("id").to_string();
    let path = format!("/api/admin/reservations/{id}");

    let response = app.admin("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["id"], id.as_str());
    assert_eq!(
        response.body["data"]["confirmationCode"],
        created["confirmationCode"]
    );

    let response = app.admin("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let response = app.admin("GET", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_and_pages() {
    let app = TestApp::seeded(0).await;
    app.book("cash").await;
    app.book("transfer").await;
    app.book("transfer").await;

    let response = app
        .admin("GET", "/api/admin/reservations?status=payment_pending&limit=1", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let page = &response.body["data"];
    assert_eq!(page["total"], 2);
    assert_eq!(page["items"].as_array().expect("items").len(), 1);
    assert_eq!(page["hasMore"], true);

    let response = app
        .admin(
            "GET",
            &format!("/api/admin/reservations?date={}", app.tomorrow()),
            None,
        )
        .await;
    assert_eq!(response.body["data"]["total"], 3);

    let response = app
        .admin("GET", "/api/admin/reservations?limit=ten", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.admin("GET", "/api/admin/reservations/stats", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total"], 3);
    let by_status = response.body["data"]["byStatus"].as_array().expect("counts");
    assert_eq!(by_status.len(), 5);
    let pending = by_status
        .iter()
        .find(|c| c["status"] == "payment_pending")
        .expect("payment_pending");
    assert_eq!(pending["count"], 2);
}

#[tokio::test]
async fn test_price_change_keeps_booked_price() {
    let app = TestApp::seeded(3).await;
    let created = app.book("cash").await;
    let id = created["reservationId"].as_str().expect("id").to_string();

    let response = app
        .admin(
            "PUT",
            "/api/admin/mass-types/difuntos",
            Some(json!({ "price": "50.00" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["price"], "50.00");

    let response = app
        .admin("GET", &format!("/api/admin/reservations/{id}"), None)
        .await;
    assert_eq!(response.body["data"]["price"], "35.00");

    let later = app.book("cash").await;
    assert_eq!(later["price"], "50.00");
}

#[tokio::test]
async fn test_slot_catalog() {
    let app = TestApp::new();

    let response = app
        .admin(
            "POST",
            "/api/admin/slots",
            Some(json!({
                "dayType": "sunday",
                "time": "07:00",
                "location": "Main church",
                "capacity": 20
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let id = response.body["data"]["id"].as_str().expect("id").to_string();
    assert_eq!(response.body["data"]["timeOfDay"], "07:00");

    let response = app
        .admin(
            "POST",
            "/api/admin/slots",
            Some(json!({
                "dayType": "sunday",
                "time": "08:00",
                "location": "Main church",
                "capacity": -1
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .admin(
            "PUT",
            &format!("/api/admin/slots/{id}"),
            Some(json!({ "capacity": 0 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["capacity"], 0);

    let response = app
        .admin("GET", "/api/admin/slots?dayType=sunday", None)
        .await;
    assert_eq!(response.body["data"].as_array().expect("slots").len(), 1);
    let response = app
        .admin("GET", "/api/admin/slots?dayType=saturday", None)
        .await;
    assert_eq!(response.body["data"], json!([]));
}

#[tokio::test]
async fn test_mass_type_catalog() {
    let app = TestApp::new();
    let body = json!({
        "code": "accion_gracias",
        "name": "Thanksgiving",
        "price": "30.00"
    });

    let response = app
        .admin("POST", "/api/admin/mass-types", Some(body.clone()))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(response.body["data"]["active"], true);

    let response = app.admin("POST", "/api/admin/mass-types", Some(body)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .admin("PUT", "/api/admin/mass-types/unknown", Some(json!({ "active": false })))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detailed_health_without_database() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health/detailed", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["database"], "in-memory");
}
