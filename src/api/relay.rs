/// Relay endpoint
///
/// POST /google-chat?script_id=<id>&<other params>
/// Body: any JSON object; forwarded with the inbound headers folded in.

use crate::api::MessageResponse;
use crate::relay::{InboundRequest, RelayOutcome, RelayService};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::post,
    Router,
};

/// State shared by relay handlers
#[derive(Clone)]
pub struct RelayAppState {
    pub relay: RelayService,
}

/// Relay routes; inbound bodies are not size-limited
pub fn create_relay_routes() -> Router<RelayAppState> {
    Router::new()
        .route("/google-chat", post(relay_google_chat))
        .layer(DefaultBodyLimit::disable())
}

/// Forward an inbound webhook to the Apps Script selected by `script_id`
///
/// Responds `200 {"message":"ok"}` whenever the forward went out, whatever
/// the destination answered. Malformed bodies and failed forwards give `400`
/// with the error text.
async fn relay_google_chat(
    State(state): State<RelayAppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<MessageResponse>) {
    tracing::info!("📥 Relay request received ({} bytes)", body.len());

    let inbound = match InboundRequest::from_parts(&body, &headers, query.as_deref()) {
        Ok(inbound) => inbound,
        Err(e) => {
            tracing::warn!("❌ Invalid relay body: {}", e);
            return (StatusCode::BAD_REQUEST, Json(MessageResponse::new(e.to_string())));
        }
    };

    match state.relay.relay(inbound).await {
        Ok(RelayOutcome::Delivered) => (StatusCode::OK, Json(MessageResponse::new("ok"))),
        Ok(RelayOutcome::Rejected { status }) => {
            tracing::info!("📨 Accepted relay, destination answered {}", status);
            (StatusCode::OK, Json(MessageResponse::new("ok")))
        }
        Err(e) => (StatusCode::BAD_REQUEST, Json(MessageResponse::new(e.to_string()))),
    }
}
