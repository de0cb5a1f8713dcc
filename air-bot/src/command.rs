//! The `air` chat command.
//!
//! Ties the resolver, the condition cache and the formatter together. The
//! hosting bot passes in the sender and the text after the command name and
//! gets back the lines to say.

use std::sync::Arc;

use tracing::{error, info};

use crate::cache::{CacheConfig, CachedConditions};
use crate::format::format_conditions;
use crate::gios::GiosClient;
use crate::resolve::CityResolver;
use crate::stations::StationDirectory;

/// Name the command is registered under.
pub const AIR_COMMAND: &str = "air";

/// Help text shown in command listings.
pub const AIR_HELP: &str = "air <city>: get air conditions in <city> from gios.gov.pl";

/// Generic reply when a command cannot be answered.
pub const GENERIC_ERROR: &str = "error";

/// What the bot should say in response to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Lines to say, in order. May be empty.
    Lines(Vec<String>),
    /// The generic error reply.
    Error,
}

impl Reply {
    /// The messages to send.
    pub fn into_messages(self) -> Vec<String> {
        match self {
            Reply::Lines(lines) => lines,
            Reply::Error => vec![GENERIC_ERROR.to_string()],
        }
    }
}

/// Handler for `air <city>`.
pub struct AirCommand {
    resolver: CityResolver,
    conditions: CachedConditions,
}

impl AirCommand {
    /// Create the command with its own directory and caches.
    pub fn new(client: GiosClient, config: &CacheConfig) -> Self {
        let directory = Arc::new(StationDirectory::new(client.clone(), config.directory_ttl));

        Self {
            resolver: CityResolver::new(Arc::clone(&directory), config.max_capacity),
            conditions: CachedConditions::new(client, directory, config),
        }
    }

    /// Answer `air <text>` sent by `sender`.
    pub async fn handle(&self, sender: &str, text: &str) -> Reply {
        let text = text.trim();
        info!(sender, query = text, "air conditions requested");

        let city = match self.resolver.resolve(text).await {
            Ok(Some(city)) => city,
            Ok(None) => {
                info!(query = text, "no matching city");
                return Reply::Error;
            }
            Err(e) => {
                error!(error = %e, "failed to load station directory");
                return Reply::Error;
            }
        };

        match self.conditions.get_conditions(&city).await {
            Ok(conditions) => Reply::Lines(format_conditions(&conditions)),
            Err(e) => {
                error!(city = %city, error = %e, "failed to get air conditions");
                Reply::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::strip;
    use crate::gios::GiosConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn command_for(server: &MockServer) -> AirCommand {
        let client = GiosClient::new(GiosConfig::default().with_base_url(server.uri())).unwrap();
        AirCommand::new(client, &CacheConfig::default())
    }

    async fn mount_json(server: &MockServer, at: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mount_stations(server: &MockServer) {
        mount_json(
            server,
            "/station/findAll",
            serde_json::json!([
                {"id": 530, "stationName": "Warszawa-Komunikacyjna", "city": {"name": "Warszawa"}},
                {"id": 544, "stationName": "Warszawa-Ursynów", "city": {"name": "Warszawa"}},
                {"id": 400, "stationName": "Kraków, Aleja Krasińskiego", "city": {"name": "Kraków"}}
            ]),
        )
        .await;
    }

    #[test]
    fn error_reply_messages() {
        assert_eq!(Reply::Error.into_messages(), vec!["error".to_string()]);
        assert!(Reply::Lines(vec![]).into_messages().is_empty());
    }

    #[tokio::test]
    async fn replies_with_station_lines() {
        let server = MockServer::start().await;
        mount_stations(&server).await;
        mount_json(&server, "/station/sensors/530", serde_json::json!([{"id": 1}, {"id": 2}])).await;
        mount_json(&server, "/station/sensors/544", serde_json::json!([{"id": 3}])).await;
        mount_json(
            &server,
            "/data/getData/1",
            serde_json::json!({"key": "PM10", "values": [{"date": "2023-01-03 13:00:00", "value": 61.3}]}),
        )
        .await;
        mount_json(
            &server,
            "/data/getData/2",
            serde_json::json!({"key": "NO2", "values": [{"date": "2023-01-03 13:00:00", "value": 48.0}]}),
        )
        .await;
        mount_json(&server, "/data/getData/3", serde_json::json!({"key": "PM10", "values": []})).await;
        mount_json(
            &server,
            "/aqindex/getIndex/530",
            serde_json::json!({"pm10IndexLevel": {"id": 2}, "no2IndexLevel": {"id": 1}}),
        )
        .await;

        let reply = command_for(&server).handle("alice", " warszawa ").await;

        let Reply::Lines(lines) = reply else {
            panic!("expected lines, got {reply:?}");
        };
        assert_eq!(lines.len(), 1);
        assert_eq!(
            strip(&lines[0]),
            "[Warszawa-Komunikacyjna] PM10: 61.3 µg/m³ :: NO2: 48.0 µg/m³"
        );
    }

    #[tokio::test]
    async fn all_sensors_empty_is_empty_reply() {
        let server = MockServer::start().await;
        mount_stations(&server).await;
        mount_json(&server, "/station/sensors/400", serde_json::json!([{"id": 9}])).await;
        mount_json(&server, "/data/getData/9", serde_json::json!({"key": "PM10", "values": []})).await;

        let reply = command_for(&server).handle("bob", "Krakow").await;
        assert_eq!(reply, Reply::Lines(vec![]));
    }

    #[tokio::test]
    async fn unresolved_city_is_error() {
        let server = MockServer::start().await;
        mount_stations(&server).await;

        let reply = command_for(&server).handle("carol", "xyzzyqq").await;
        assert_eq!(reply, Reply::Error);
    }

    #[tokio::test]
    async fn directory_failure_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/station/findAll"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let reply = command_for(&server).handle("dave", "warszawa").await;
        assert_eq!(reply, Reply::Error);
    }

    #[tokio::test]
    async fn repeated_command_uses_caches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/station/findAll"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 400, "stationName": "Kraków, Aleja Krasińskiego", "city": {"name": "Kraków"}}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/station/sensors/400"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let command = command_for(&server);
        let first = command.handle("erin", "kraków").await;
        let second = command.handle("erin", "kraków").await;
        assert_eq!(first, second);
    }
}
