//! URL layout of the chat server.

use url::Url;

use crate::error::ClientError;

/// Builds every URL the client talks to from the page origin and the group id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoutes {
    origin: Url,
    group_id: i64,
}

impl ChatRoutes {
    /// # Errors
    ///
    /// Returns an error if `origin` is not an absolute `http` or `https` URL.
    pub fn new(origin: &str, group_id: i64) -> Result<Self, ClientError> {
        let origin = Url::parse(origin)?;
        match origin.scheme() {
            "http" | "https" => Ok(Self { origin, group_id }),
            other => Err(ClientError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    /// WebSocket URL of the group; `wss` when the origin is `https`, `ws` otherwise.
    pub fn websocket_url(&self) -> Result<Url, ClientError> {
        let mut url = self.resolve(&format!("/ws/group/{}/", self.group_id))?;
        let scheme = if self.origin.scheme() == "https" {
            "wss"
        } else {
            "ws"
        };
        url.set_scheme(scheme)
            .map_err(|_| ClientError::UnsupportedScheme(scheme.to_string()))?;
        Ok(url)
    }

    /// Polling endpoint with the `last_id` cursor.
    pub fn poll_url(&self, last_id: i64) -> Result<Url, ClientError> {
        let mut url = self.resolve(&format!("/group/{}/chat/api/", self.group_id))?;
        url.query_pairs_mut()
            .append_pair("last_id", &last_id.to_string());
        Ok(url)
    }

    pub fn start_call_url(&self) -> Result<Url, ClientError> {
        self.resolve(&format!("/group/{}/call/start/", self.group_id))
    }

    /// Resolve a server path against the page origin.
    pub fn resolve(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.origin.join(path)?)
    }
}
