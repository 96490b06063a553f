use crate::{RemoteTransport, TransportError};
use reqwest::blocking::Client;

/// Secret header expected by the hosted JSON-bin backend. Absent for
/// public bins.
pub const SECRET_HEADER: &str = "X-Master-Key";

/// Blocking HTTP transport against a single bin-style resource:
/// `GET <base>/latest` fetches the newest revision, `PUT <base>`
/// overwrites the document.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base: String,
    secret: Option<String>,
    client: Client,
}

impl HttpTransport {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            secret: None,
            client: Client::new(),
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    fn check(status: reqwest::StatusCode, body: String) -> Result<String, TransportError> {
        if status.is_success() {
            Ok(body)
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl RemoteTransport for HttpTransport {
    fn fetch_latest(&self) -> Result<String, TransportError> {
        let url = format!("{}/latest", self.base);
        tracing::debug!(%url, "fetching remote deck document");
        let mut request = self.client.get(&url);
        if let Some(secret) = &self.secret {
            request = request.header(SECRET_HEADER, secret);
        }
        let response = request
            .send()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        Self::check(status, body)
    }

    fn overwrite(&self, body: &str) -> Result<(), TransportError> {
        tracing::debug!(url = %self.base, bytes = body.len(), "overwriting remote deck document");
        let mut request = self
            .client
            .put(&self.base)
            .header("Content-Type", "application/json")
            .body(body.to_string());
        if let Some(secret) = &self.secret {
            request = request.header(SECRET_HEADER, secret);
        }
        let response = request
            .send()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        Self::check(status, body).map(|_| ())
    }
}
