//! Live parking event stream for dashboard clients

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::select;
use tracing::{debug, error, info, warn};

use crate::application::events::{EventMessage, SharedEventBus};

/// Query parameters for narrowing the stream
#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    /// Only events about this slot. Occupancy changes carry no slot and are dropped.
    pub slot_id: Option<String>,
    /// Comma-separated event types, e.g. `vehicle_parked,slot_released`
    pub event_types: Option<String>,
}

impl EventFilter {
    pub fn matches(&self, message: &EventMessage) -> bool {
        if let Some(ref wanted) = self.slot_id {
            if message.event.slot_id() != Some(wanted.as_str()) {
                return false;
            }
        }

        if let Some(ref types) = self.event_types {
            let event_type = message.event.event_type();
            if !types.split(',').map(str::trim).any(|t| t == event_type) {
                return false;
            }
        }

        true
    }
}

#[derive(Clone)]
pub struct NotificationState {
    pub event_bus: SharedEventBus,
}

/// `GET /api/v1/notifications/ws`
#[utoipa::path(
    get,
    path = "/api/v1/notifications/ws",
    tag = "WebSocket Notifications",
    params(
        ("slot_id" = Option<String>, Query, description = "Only events for this slot"),
        ("event_types" = Option<String>, Query, description = "vehicle_parked, slot_released, occupancy_changed")
    ),
    responses((status = 101, description = "Switching to WebSocket"))
)]
pub async fn ws_notifications_handler(
    ws: WebSocketUpgrade,
    State(state): State<NotificationState>,
    Query(filter): Query<EventFilter>,
) -> impl IntoResponse {
    info!(
        slot_id = ?filter.slot_id,
        event_types = ?filter.event_types,
        "Notification client connecting"
    );

    ws.on_upgrade(move |socket| handle_notification_socket(socket, state, filter))
}

async fn handle_notification_socket(
    socket: WebSocket,
    state: NotificationState,
    filter: EventFilter,
) {
    let (mut sender, mut receiver) = socket.split();
    let mut subscriber = state.event_bus.subscribe();

    let welcome = serde_json::json!({
        "type": "connected",
        "message": "Connected to parking event stream",
        "filter": {
            "slot_id": filter.slot_id,
            "event_types": filter.event_types
        }
    });

    if let Err(e) = sender
        .send(Message::Text(welcome.to_string().into()))
        .await
    {
        error!("Failed to send welcome message: {}", e);
        return;
    }

    loop {
        select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if let Err(e) = sender.send(Message::Pong(data)).await {
                            error!("Failed to send pong: {}", e);
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        warn!("Notification socket error: {}", e);
                        break;
                    }
                    // clients are read-only
                    Some(Ok(_)) => {}
                }
            }

            event = subscriber.recv() => {
                let Some(event_msg) = event else {
                    warn!("Event bus closed");
                    break;
                };
                if !filter.matches(&event_msg) {
                    continue;
                }

                match serde_json::to_string(&event_msg) {
                    Ok(json) => {
                        if let Err(e) = sender.send(Message::Text(json.into())).await {
                            debug!("Client went away: {}", e);
                            break;
                        }
                    }
                    Err(e) => error!("Failed to serialize event: {}", e),
                }
            }
        }
    }

    info!("Notification client disconnected");
}

pub fn create_notification_state(event_bus: SharedEventBus) -> NotificationState {
    NotificationState { event_bus }
}
