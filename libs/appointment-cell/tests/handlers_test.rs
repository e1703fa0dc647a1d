// libs/appointment-cell/tests/handlers_test.rs
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;

use appointment_cell::handlers::AppointmentState;
use appointment_cell::router::appointment_routes;
use appointment_cell::services::{Channel, Notification, NotificationDispatcher};
use directory_cell::services::{ProviderDirectory, SeedCatalog};

struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

#[async_trait]
impl NotificationDispatcher for ChannelNotifier {
    async fn dispatch(&self, notification: Notification) {
        let _ = self.sender.send(notification);
    }
}

fn app() -> (Router, mpsc::UnboundedReceiver<Notification>) {
    let directory = Arc::new(ProviderDirectory::from_source(&SeedCatalog).unwrap());
    let (sender, receiver) = mpsc::unbounded_channel();
    let state = AppointmentState::new(directory, Arc::new(ChannelNotifier { sender }));

    (appointment_routes(Arc::new(state)), receiver)
}

fn booking_body() -> Value {
    json!({
        "provider_id": 5,
        "date": "2099-03-01",
        "time_slot": "09:30 AM",
        "consultation_type": "in-person",
        "patient": {
            "name": "Karan Malhotra",
            "age": 29,
            "gender": "male",
            "mobile": "9000000001"
        },
        "symptoms": "ear pain"
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json_response)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn booking_confirms_and_sends_sms() {
    let (app, mut receiver) = app();

    let (status, body) = send(app, post_json("/", booking_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"]["provider_name"], "Dr. Kavita Singh");
    assert_eq!(body["appointment"]["fee"], 700.0);
    assert_eq!(body["appointment"]["consultation_type"], "in-person");
    assert_eq!(body["notifications"], json!(["sms"]));

    let sms = tokio::time::timeout(Duration::from_secs(2), receiver.recv())
        .await
        .expect("notification dispatched")
        .unwrap();
    assert_eq!(sms.channel, Channel::Sms);
    assert_eq!(sms.recipient, "9000000001");
}

#[tokio::test]
async fn booking_with_both_options_is_rejected() {
    let (app, _receiver) = app();
    let mut body = booking_body();
    body["consultation_type"] = json!("both-options");

    let (status, response) = send(app, post_json("/", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Choose teleconsultation or in-person");
}

#[tokio::test]
async fn booking_unknown_provider_is_not_found() {
    let (app, _receiver) = app();
    let mut body = booking_body();
    body["provider_id"] = json!(77);

    let (status, _) = send(app, post_json("/", body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn time_slots_are_listed() {
    let (app, _receiver) = app();
    let request = Request::builder().uri("/time-slots").body(Body::empty()).unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 14);
    assert_eq!(body["time_slots"][0], "09:00 AM");
    assert_eq!(body["time_slots"][13], "05:30 PM");
}
