//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::warn;

use crate::command::{AIR_COMMAND, AIR_HELP};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/commands", get(list_commands))
        .route("/command", post(run_command))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List registered commands with their help text.
async fn list_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![CommandHelp {
            name: AIR_COMMAND.to_string(),
            help: AIR_HELP.to_string(),
        }],
    })
}

/// Split a message into the command name and its argument text.
fn split_command(message: &str) -> Option<(&str, &str)> {
    let message = message.trim_start();
    if message.is_empty() {
        return None;
    }

    Some(
        message
            .split_once(char::is_whitespace)
            .unwrap_or((message, "")),
    )
}

/// Dispatch a chat message to its command.
async fn run_command(
    State(state): State<AppState>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, AppError> {
    let (name, args) = split_command(&req.message).ok_or_else(|| AppError::BadRequest {
        message: "empty message".to_string(),
    })?;

    if !name.eq_ignore_ascii_case(AIR_COMMAND) {
        return Err(AppError::NotFound {
            message: format!("unknown command: {name}"),
        });
    }

    let reply = state.air.handle(&req.sender, args).await;

    Ok(Json(CommandResponse {
        replies: reply.into_messages(),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
        };

        warn!(%status, %message, "command rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::cache::CacheConfig;
    use crate::command::AirCommand;
    use crate::gios::{GiosClient, GiosConfig};

    fn router_for(base_url: &str) -> Router {
        let client = GiosClient::new(GiosConfig::default().with_base_url(base_url)).unwrap();
        let air = AirCommand::new(client, &CacheConfig::default());
        create_router(AppState::new(air))
    }

    fn post_command(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/command")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn split_command_parts() {
        assert_eq!(split_command("air warszawa"), Some(("air", "warszawa")));
        assert_eq!(
            split_command("  air biała podlaska"),
            Some(("air", "biała podlaska"))
        );
        assert_eq!(split_command("air"), Some(("air", "")));
        assert_eq!(split_command("   "), None);
    }

    #[tokio::test]
    async fn health_ok() {
        let response = router_for("http://127.0.0.1:1")
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn lists_air_command() {
        let response = router_for("http://127.0.0.1:1")
            .oneshot(Request::get("/commands").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let listing: CommandsResponse = body_json(response).await;
        assert_eq!(listing.commands.len(), 1);
        assert_eq!(listing.commands[0].name, "air");
        assert_eq!(listing.commands[0].help, AIR_HELP);
    }

    #[tokio::test]
    async fn unknown_command_is_not_found() {
        let response = router_for("http://127.0.0.1:1")
            .oneshot(post_command(serde_json::json!({"sender": "alice", "message": "weather paris"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_message_is_bad_request() {
        let response = router_for("http://127.0.0.1:1")
            .oneshot(post_command(serde_json::json!({"message": "  "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn air_command_replies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/station/findAll"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 114, "stationName": "Wrocław - Bartnicza", "city": {"name": "Wrocław"}}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/station/sensors/114"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 642}])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/getData/642"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "key": "NO2",
                "values": [{"date": "2023-01-03 13:00:00", "value": 17.0}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/aqindex/getIndex/114"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "no2IndexLevel": {"id": 0}
            })))
            .mount(&server)
            .await;

        let response = router_for(&server.uri())
            .oneshot(post_command(serde_json::json!({"sender": "alice", "message": "AIR wroclaw"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let reply: CommandResponse = body_json(response).await;
        assert_eq!(
            reply.replies,
            vec!["\x0310[Wrocław - Bartnicza]\x03 NO2: \x030917.0\x03 µg/m³".to_string()]
        );
    }

    #[tokio::test]
    async fn unresolved_city_replies_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/station/findAll"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let response = router_for(&server.uri())
            .oneshot(post_command(serde_json::json!({"sender": "bob", "message": "air"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let reply: CommandResponse = body_json(response).await;
        assert_eq!(reply.replies, vec!["error".to_string()]);
    }
}
