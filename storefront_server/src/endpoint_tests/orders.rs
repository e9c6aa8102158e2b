use std::str::FromStr;

use actix_web::{http::StatusCode, test, web, web::ServiceConfig, App};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use storefront_common::{MinorUnits, Secret};
use storefront_engine::{
    db_types::{CustomerDetails, Order, OrderId, OrderItem, OrderStatusType, PaymentId},
    helpers::calculate_payment_signature,
    GatewayClientError,
    OrderFlowApi,
    PaymentGatewayError,
    RemoteOrder,
    StatusUpdate,
};

use super::{
    helpers::{post_raw_request, post_request},
    mocks::{MockOrderManager, MockPaymentGateway},
};
use crate::routes::{health, CreateOrderRoute, VerifyPaymentRoute};

const SECRET: &str = "test_secret";
const ORDER_ID: &str = "order_IluGWxBm9U8zJ8";
const PAYMENT_ID: &str = "pay_29QQoUBi66xm2f";

#[actix_web::test]
async fn health_check() {
    let app = test::init_service(App::new().service(health)).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "👍️\n");
}

#[actix_web::test]
async fn create_order_returns_provider_order() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockPaymentGateway::new();
    gateway
        .expect_create_remote_order()
        .withf(|amount, currency| *amount == MinorUnits::from(55000) && currency == "INR")
        .times(1)
        .returning(|amount, currency| Ok(remote_order(amount, currency)));
    let mut db = MockOrderManager::new();
    db.expect_insert_order()
        .withf(|order| {
            order.order_id.as_str() == ORDER_ID &&
                order.amount == Decimal::from_str("550.00").unwrap() &&
                order.items.len() == 1 &&
                order.customer_details.email == "asha@example.com"
        })
        .times(1)
        .returning(|_| Ok(unpaid_order()));
    let body = json!({
        "amount": 55000,
        "items": [{"name": "Brass Diya", "price": 550, "quantity": 1}],
        "customerDetails": {"name": "Asha", "email": "asha@example.com"}
    });
    let (status, body) = post_request("/create-order", body, configure_create(db, gateway)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, remote_order(MinorUnits::from(55000), "INR").body);
}

#[actix_web::test]
async fn create_order_rejects_zero_amount() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockPaymentGateway::new();
    gateway.expect_create_remote_order().never();
    let mut db = MockOrderManager::new();
    db.expect_insert_order().never();
    let (status, body) = post_request("/create-order", json!({"amount": 0}), configure_create(db, gateway)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        r#"{"success":false,"message":"Order amount must be a positive number of minor units. Got 0"}"#
    );
}

#[actix_web::test]
async fn create_order_gateway_failure() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockPaymentGateway::new();
    gateway
        .expect_create_remote_order()
        .returning(|_, _| Err(GatewayClientError("Query failed. Error 401. Authentication failed".into())));
    let mut db = MockOrderManager::new();
    db.expect_insert_order().never();
    let (status, body) = post_request("/create-order", json!({"amount": 10000}), configure_create(db, gateway)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"success":false,"message":"Order failed"}"#);
}

#[actix_web::test]
async fn create_order_database_failure_is_not_leaked() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockPaymentGateway::new();
    gateway.expect_create_remote_order().returning(|amount, currency| Ok(remote_order(amount, currency)));
    let mut db = MockOrderManager::new();
    db.expect_insert_order().returning(|_| Err(PaymentGatewayError::DatabaseError("database is locked".into())));
    let (status, body) = post_request("/create-order", json!({"amount": 10000}), configure_create(db, gateway)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"success":false,"message":"Internal server error"}"#);
}

#[actix_web::test]
async fn create_order_malformed_body() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockPaymentGateway::new();
    gateway.expect_create_remote_order().never();
    let db = MockOrderManager::new();
    let (status, body) =
        post_raw_request("/create-order", r#"{"amount": "lots"}"#.to_string(), configure_create(db, gateway)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Could not read request body."));
}

#[actix_web::test]
async fn verify_payment_success() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_update_status_and_payment_id()
        .withf(|order_id, status, payment_id| {
            order_id.as_str() == ORDER_ID && *status == OrderStatusType::Paid && payment_id.as_str() == PAYMENT_ID
        })
        .times(1)
        .returning(|_, _, _| Ok(StatusUpdate::Updated(paid_order())));
    let (status, body) = post_request("/verify-payment", valid_confirmation(), configure_verify(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true}"#);
}

#[actix_web::test]
async fn verify_payment_repeat_is_ok() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_update_status_and_payment_id().returning(|_, _, _| Ok(StatusUpdate::Unchanged(paid_order())));
    let (status, body) = post_request("/verify-payment", valid_confirmation(), configure_verify(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true}"#);
}

#[actix_web::test]
async fn verify_payment_invalid_signature() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_update_status_and_payment_id().never();
    db.expect_fetch_order_by_order_id().never();
    let mut body = valid_confirmation();
    body["razorpay_signature"] = json!("0".repeat(64));
    let (status, body) = post_request("/verify-payment", body, configure_verify(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"success":false,"message":"Invalid signature"}"#);
}

#[actix_web::test]
async fn verify_payment_signed_with_another_secret() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_update_status_and_payment_id().never();
    let body = json!({
        "razorpay_order_id": ORDER_ID,
        "razorpay_payment_id": PAYMENT_ID,
        "razorpay_signature": calculate_payment_signature(ORDER_ID, PAYMENT_ID, "not_the_secret"),
    });
    let (status, _) = post_request("/verify-payment", body, configure_verify(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn verify_payment_missing_fields() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_update_status_and_payment_id().never();
    let body = json!({"razorpay_order_id": ORDER_ID, "razorpay_payment_id": ""});
    let (status, body) = post_request("/verify-payment", body, configure_verify(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"success":false,"message":"Missing required fields: payment_id, signature"}"#);
}

#[actix_web::test]
async fn verify_payment_unknown_order() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_update_status_and_payment_id()
        .returning(|order_id, _, _| Err(PaymentGatewayError::OrderNotFound(order_id.clone())));
    let (status, body) = post_request("/verify-payment", valid_confirmation(), configure_verify(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"success":false,"message":"Order not found"}"#);
}

#[actix_web::test]
async fn verify_payment_conflicts() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_update_status_and_payment_id().returning(|_, _, _| Err(PaymentGatewayError::OrderModificationForbidden));
    let (status, body) = post_request("/verify-payment", valid_confirmation(), configure_verify(db)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, r#"{"success":false,"message":"The order cannot accept this payment in its current state"}"#);

    let mut db = MockOrderManager::new();
    db.expect_update_status_and_payment_id()
        .returning(|_, _, payment_id| Err(PaymentGatewayError::PaymentAlreadyExists(payment_id.clone())));
    let (status, body) = post_request("/verify-payment", valid_confirmation(), configure_verify(db)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, r#"{"success":false,"message":"The payment has already been applied to another order"}"#);
}

#[actix_web::test]
async fn verify_payment_database_failure() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderManager::new();
    db.expect_update_status_and_payment_id()
        .returning(|_, _, _| Err(PaymentGatewayError::DatabaseError("no such table: orders".into())));
    let (status, body) = post_request("/verify-payment", valid_confirmation(), configure_verify(db)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"success":false,"message":"Internal server error"}"#);
}

fn configure_create(db: MockOrderManager, gateway: MockPaymentGateway) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let api = OrderFlowApi::new(db, gateway, Secret::from(SECRET));
        cfg.app_data(web::Data::new(api)).service(CreateOrderRoute::<MockOrderManager, MockPaymentGateway>::new());
    }
}

fn configure_verify(db: MockOrderManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_remote_order().never();
        let api = OrderFlowApi::new(db, gateway, Secret::from(SECRET));
        cfg.app_data(web::Data::new(api)).service(VerifyPaymentRoute::<MockOrderManager, MockPaymentGateway>::new());
    }
}

fn valid_confirmation() -> Value {
    json!({
        "razorpay_order_id": ORDER_ID,
        "razorpay_payment_id": PAYMENT_ID,
        "razorpay_signature": calculate_payment_signature(ORDER_ID, PAYMENT_ID, SECRET),
    })
}

fn remote_order(amount: MinorUnits, currency: &str) -> RemoteOrder {
    let body = json!({
        "id": ORDER_ID,
        "entity": "order",
        "amount": amount.value(),
        "amount_paid": 0,
        "amount_due": amount.value(),
        "currency": currency,
        "receipt": "receipt_1717171717171",
        "status": "created",
        "attempts": 0,
        "notes": [],
        "created_at": 1717171717
    });
    RemoteOrder { id: OrderId::from(ORDER_ID), body }
}

fn unpaid_order() -> Order {
    let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    Order {
        id: 1,
        order_id: OrderId::from(ORDER_ID),
        payment_id: None,
        amount: Decimal::from_str("550.00").unwrap(),
        currency: "INR".into(),
        items: vec![OrderItem::new("Brass Diya", Decimal::from(550), 1)],
        customer_details: CustomerDetails {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            ..Default::default()
        },
        status: OrderStatusType::Created,
        created_at,
        updated_at: created_at,
    }
}

fn paid_order() -> Order {
    Order {
        payment_id: Some(PaymentId::from(PAYMENT_ID)),
        status: OrderStatusType::Paid,
        updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 5, 0).unwrap(),
        ..unpaid_order()
    }
}
