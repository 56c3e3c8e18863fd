//! Thin blocking HTTP clients for the Tripwire and Wanderer APIs.

use crate::CliError;
use crate::config::Config;
use base64::Engine as _;
use remora_core::{DeleteRequest, MapEnvelope, Signature, Wormhole};
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build()
}

fn basic_credentials(user: &str, password: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}"));
    format!("Basic {encoded}")
}

fn request_error(error: ureq::Error) -> CliError {
    match error {
        ureq::Error::Status(status, response) => CliError::Api {
            status,
            body: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => CliError::Transport(transport.to_string()),
    }
}

/// Reads signatures and wormholes from a Tripwire installation.
///
/// Tripwire routes everything through one endpoint and dispatches on the
/// `q` query parameter; the mask selects which corporation view to read.
pub struct TripwireClient {
    agent: ureq::Agent,
    base_url: String,
    mask_id: String,
    authorization: String,
}

impl TripwireClient {
    pub fn new(config: &Config) -> Self {
        Self {
            agent: agent(),
            base_url: config.tripwire_url.clone(),
            mask_id: config.tripwire_mask_id.clone(),
            authorization: basic_credentials(&config.tripwire_user, &config.tripwire_password),
        }
    }

    pub fn signatures(&self) -> Result<Vec<Signature>, CliError> {
        let body = self.fetch("/signatures")?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn wormholes(&self) -> Result<Vec<Wormhole>, CliError> {
        let body = self.fetch("/wormholes")?;
        Ok(serde_json::from_str(&body)?)
    }

    fn fetch(&self, endpoint: &str) -> Result<String, CliError> {
        let url = format!("{}?q={}&maskID={}", self.base_url, endpoint, self.mask_id);
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &self.authorization)
            .call()
            .map_err(request_error)?;
        Ok(response.into_string()?)
    }
}

/// Counts reported by Wanderer after a snapshot submission.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct CreateCounts {
    pub updated: i64,
    pub created: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateOutcome {
    pub connections: CreateCounts,
    pub systems: CreateCounts,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateResponse {
    pub data: CreateOutcome,
}

/// Reads and writes one Wanderer map over its systems API.
pub struct WandererClient {
    agent: ureq::Agent,
    systems_url: String,
    authorization: String,
}

impl WandererClient {
    pub fn new(config: &Config) -> Self {
        Self {
            agent: agent(),
            systems_url: format!(
                "{}/api/maps/{}/systems",
                config.wanderer_url, config.wanderer_map_slug
            ),
            authorization: format!("Bearer {}", config.wanderer_api_key),
        }
    }

    pub fn systems_and_connections(&self) -> Result<MapEnvelope, CliError> {
        let response = self.request("GET").call().map_err(request_error)?;
        Ok(serde_json::from_str(&response.into_string()?)?)
    }

    pub fn delete_systems_and_connections(&self, request: &DeleteRequest) -> Result<(), CliError> {
        let body = serde_json::to_string(request)?;
        self.request("DELETE")
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(request_error)?;
        Ok(())
    }

    pub fn submit_systems_and_connections(
        &self,
        envelope: &MapEnvelope,
    ) -> Result<CreateResponse, CliError> {
        let body = serde_json::to_string(envelope)?;
        let response = self
            .request("POST")
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(request_error)?;
        Ok(serde_json::from_str(&response.into_string()?)?)
    }

    /// Every call to the systems endpoint carries the bearer token and
    /// accepts JSON, whatever the verb.
    fn request(&self, method: &str) -> ureq::Request {
        self.agent
            .request(method, &self.systems_url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            tripwire_url: "https://tripwire.example".to_string(),
            tripwire_user: "scanner".to_string(),
            tripwire_password: "hunter2".to_string(),
            tripwire_mask_id: "679815158.2".to_string(),
            wanderer_url: "https://wanderer.example".to_string(),
            wanderer_api_key: "key".to_string(),
            wanderer_map_slug: "home-chain".to_string(),
            home_system_id: 31_000_988,
            x_separation: 195.0,
            y_separation: 60.0,
            poll_interval_seconds: 0,
            dry_run: false,
        }
    }

    #[test]
    fn basic_credentials_match_the_rfc_form() {
        assert_eq!(basic_credentials("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn wanderer_requests_carry_shared_headers() {
        let client = WandererClient::new(&config());
        for method in ["GET", "DELETE", "POST"] {
            let request = client.request(method);
            assert_eq!(request.header("Authorization"), Some("Bearer key"));
            assert_eq!(request.header("Accept"), Some("application/json"));
        }
    }

    #[test]
    fn create_response_decodes_nested_counts() {
        let response: CreateResponse = serde_json::from_value(serde_json::json!({
            "data": {
                "connections": { "updated": 2, "created": 1 },
                "systems": { "updated": 3, "created": 0 }
            }
        }))
        .unwrap();
        assert_eq!(response.data.connections.created, 1);
        assert_eq!(response.data.connections.updated, 2);
        assert_eq!(response.data.systems.created, 0);
        assert_eq!(response.data.systems.updated, 3);
    }

    #[test]
    fn create_response_tolerates_missing_sections() {
        let response: CreateResponse = serde_json::from_value(serde_json::json!({
            "data": { "systems": { "created": 4 } }
        }))
        .unwrap();
        assert_eq!(response.data.systems.created, 4);
        assert_eq!(response.data.connections.created, 0);
    }
}
