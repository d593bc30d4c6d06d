//! Request adapter for the generative-text endpoint.
//!
//! The adapter always resolves to a displayable string: any failure mode
//! (missing credential, transport error, malformed or empty payload) maps
//! to a fixed advisory so the widgets never see a raw fault. There are no
//! retries and no caching; every augmentation click issues a fresh call.

use crate::api::{GenerateRequest, GenerateResponse};
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-09-2025:generateContent";

/// Shown when no API key is configured. No network call is attempted.
pub const ADVICE_UNCONFIGURED: &str =
    "⚠️ API Key belum diset. Hubungi admin untuk aktivasi fitur AI.";
/// Shown on transport failures and non-success HTTP statuses.
pub const ADVICE_TRANSPORT: &str = "Terjadi kesalahan koneksi saat menghubungi AI.";
/// Shown when the provider answered but returned no usable text.
pub const ADVICE_EMPTY: &str = "Maaf, AI sedang sibuk. Coba lagi nanti.";

/// Explicitly injected credential. The "unconfigured" case is a first-class
/// value checked before any network attempt, rather than an ambient env
/// lookup inside the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Unconfigured,
    Key(String),
}

impl Credential {
    pub fn from_option(key: Option<String>) -> Self {
        match key {
            Some(key) if !key.trim().is_empty() => Credential::Key(key),
            _ => Credential::Unconfigured,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Credential::Key(_))
    }
}

pub struct AdviceClient {
    client: Client,
    endpoint: String,
    credential: Credential,
    issued: AtomicU64,
}

impl AdviceClient {
    pub fn new(credential: Credential, endpoint: Option<String>) -> Self {
        AdviceClient {
            client: Client::new(),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            credential,
            issued: AtomicU64::new(0),
        }
    }

    /// Number of network requests actually issued.
    pub fn requests_issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }

    /// Send a prompt and return the text to display. Never errors; every
    /// failure mode degrades to one of the fixed advisories.
    pub async fn request(&self, prompt: &str) -> String {
        let key = match &self.credential {
            Credential::Unconfigured => {
                debug!("advice requested without a configured credential");
                return ADVICE_UNCONFIGURED.to_string();
            }
            Credential::Key(key) => key,
        };

        self.issued.fetch_add(1, Ordering::Relaxed);
        let url = format!("{}?key={}", self.endpoint, key);
        let request = GenerateRequest::from_prompt(prompt);

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("advice request failed to send: {err}");
                return ADVICE_TRANSPORT.to_string();
            }
        };

        if !response.status().is_success() {
            warn!("advice endpoint returned {}", response.status());
            return ADVICE_TRANSPORT.to_string();
        }

        let payload: GenerateResponse = match response.json().await {
            Ok(payload) => payload,
            Err(err) => {
                warn!("advice payload did not decode: {err}");
                return ADVICE_TRANSPORT.to_string();
            }
        };

        match payload.first_text() {
            Some(text) => {
                debug!("advice response received ({} bytes)", text.len());
                text.to_string()
            }
            None => ADVICE_EMPTY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys_are_unconfigured() {
        assert_eq!(Credential::from_option(None), Credential::Unconfigured);
        assert_eq!(
            Credential::from_option(Some("   ".to_string())),
            Credential::Unconfigured
        );
        assert!(Credential::from_option(Some("k".to_string())).is_configured());
    }

    #[tokio::test]
    async fn unconfigured_credential_short_circuits_without_network() {
        let client = AdviceClient::new(Credential::Unconfigured, None);
        let text = client.request("Berikan 3 tips keuangan.").await;
        assert_eq!(text, ADVICE_UNCONFIGURED);
        assert_eq!(client.requests_issued(), 0);
    }

    #[tokio::test]
    async fn transport_failure_degrades_to_advisory() {
        // An unparseable endpoint makes send() fail immediately, offline.
        let client = AdviceClient::new(
            Credential::Key("k".to_string()),
            Some("not a url".to_string()),
        );
        let text = client.request("halo").await;
        assert_eq!(text, ADVICE_TRANSPORT);
        assert_eq!(client.requests_issued(), 1);
    }
}
