//! App-side endpoints for Dapr pub/sub delivery
//!
//! Dapr discovers what the app wants through `GET /dapr/subscribe` and then
//! POSTs every message on the topic to the declared route as a CloudEvent.
//!
//! # Routes
//!
//! - `GET  /dapr/subscribe` - the subscription list
//! - `POST /cns/events`     - message delivery

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{CnsError, Result};

/// Route messages are delivered to
pub const EVENTS_ROUTE: &str = "/cns/events";

/// Callback receiving the payload of each delivered message
pub type Handler = Box<dyn FnMut(Value) + Send>;

/// One pub/sub topic the app listens on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(rename = "pubsubname")]
    pub pubsub: String,
    pub topic: String,
    pub route: String,
}

impl Subscription {
    pub fn new(pubsub: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            pubsub: pubsub.into(),
            topic: topic.into(),
            route: EVENTS_ROUTE.to_string(),
        }
    }
}

/// Shared state behind the router
#[derive(Clone)]
pub struct AppState {
    subscription: Subscription,
    handler: Arc<Mutex<Handler>>,
}

impl AppState {
    pub fn new(subscription: Subscription, handler: Handler) -> Self {
        Self {
            subscription,
            handler: Arc::new(Mutex::new(handler)),
        }
    }
}

/// Build the axum router for one subscription
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/dapr/subscribe", get(subscribe_handler))
        .route(EVENTS_ROUTE, post(event_handler))
        .with_state(state)
}

/// GET /dapr/subscribe
async fn subscribe_handler(State(state): State<AppState>) -> Json<Vec<Subscription>> {
    debug!("Subscription discovery for topic {}", state.subscription.topic);
    Json(vec![state.subscription.clone()])
}

/// POST /cns/events
///
/// Dapr sends `application/cloudevents+json`, so the body is decoded by hand
/// rather than through the `Json` extractor.
async fn event_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<Value>, (StatusCode, Json<Value>)> {
    let event: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!("Dropping undecodable event: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "DROP", "error": e.to_string()})),
        )
    })?;
    let data = unwrap_event(event);

    // Held across the call so deliveries are handled one at a time
    let mut handler = state.handler.lock().await;
    (*handler)(data);

    Ok(Json(json!({"status": "SUCCESS"})))
}

/// The payload of a CloudEvent, or the body itself when it is not one
fn unwrap_event(event: Value) -> Value {
    match event {
        Value::Object(mut map) if map.contains_key("specversion") || map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// HTTP server that receives messages for a single subscription
pub struct SubscriptionServer {
    host: String,
    port: u16,
    state: AppState,
}

impl SubscriptionServer {
    pub fn new(host: &str, port: u16, subscription: Subscription, handler: Handler) -> Self {
        Self {
            host: host.to_string(),
            port,
            state: AppState::new(subscription, handler),
        }
    }

    /// Server for `settings.server_host:server_port`, subscribed to `topic`
    pub fn from_settings(settings: &Settings, topic: &str, handler: Handler) -> Result<Self> {
        Ok(Self::new(
            &settings.server_host,
            settings.server_port()?,
            Subscription::new(&settings.pubsub, topic),
            handler,
        ))
    }

    pub fn subscription(&self) -> &Subscription {
        &self.state.subscription
    }

    /// Bind and serve until Ctrl-C
    pub async fn serve(self) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| CnsError::Server(format!("failed to bind {}: {}", addr, e)))?;

        info!(
            "Listening on {} for {}/{}",
            addr, self.state.subscription.pubsub, self.state.subscription.topic
        );

        axum::serve(listener, app_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CnsError::Server(e.to_string()))?;

        info!("Subscription server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
