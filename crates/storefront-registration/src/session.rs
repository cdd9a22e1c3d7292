//! Signed session cookies.
//!
//! The cookie carries only a random session id and its HMAC-SHA256
//! signature (`<id>.<sig>`, both base64url). Feedback itself stays on the
//! server, keyed by the id.

use crate::error::RegistrationError;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretVec};
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// Random bytes in a session id.
const SESSION_ID_BYTES: usize = 32;

/// Upper bound on an accepted cookie value, well above a genuine one.
const MAX_COOKIE_VALUE_LEN: usize = 128;

/// Identifier of one browser session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Issues and verifies session cookies.
pub struct SessionCookies {
    key: SecretVec<u8>,
    cookie_name: String,
    max_age: Duration,
}

impl SessionCookies {
    pub fn new(key: Vec<u8>, cookie_name: impl Into<String>, max_age: Duration) -> Self {
        Self {
            key: SecretVec::new(key),
            cookie_name: cookie_name.into(),
            max_age,
        }
    }

    /// Generate a random signing key for deployments without a configured one.
    pub fn random_key() -> Vec<u8> {
        let mut key = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        key
    }

    /// Start a new session.
    pub fn issue(&self) -> SessionId {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        SessionId(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Find a correctly signed session cookie in the request headers.
    ///
    /// Missing, malformed and tampered cookies all yield `None`.
    pub fn session_from_headers(&self, headers: &HeaderMap) -> Option<SessionId> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == self.cookie_name)
            .find_map(|(_, value)| self.verify(value))
    }

    /// Build the `Set-Cookie` header for a session.
    pub fn set_cookie_header(
        &self,
        session: &SessionId,
    ) -> Result<(HeaderName, HeaderValue), RegistrationError> {
        let cookie = format!(
            "{}={}.{}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name,
            session.as_str(),
            self.sign(session.as_str())?,
            self.max_age.as_secs()
        );

        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| RegistrationError::Session(format!("Invalid cookie header: {}", e)))?;
        Ok((SET_COOKIE, value))
    }

    fn mac(&self) -> Result<HmacSha256, RegistrationError> {
        HmacSha256::new_from_slice(self.key.expose_secret())
            .map_err(|e| RegistrationError::Session(e.to_string()))
    }

    fn sign(&self, id: &str) -> Result<String, RegistrationError> {
        let mut mac = self.mac()?;
        mac.update(id.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    fn verify(&self, cookie_value: &str) -> Option<SessionId> {
        if cookie_value.len() > MAX_COOKIE_VALUE_LEN {
            return None;
        }

        let (id, sig) = cookie_value.split_once('.')?;
        let decoded_id = URL_SAFE_NO_PAD.decode(id).ok()?;
        if decoded_id.len() != SESSION_ID_BYTES {
            return None;
        }

        let expected = URL_SAFE_NO_PAD.decode(sig).ok()?;
        let mut mac = self.mac().ok()?;
        mac.update(id.as_bytes());
        mac.verify_slice(&expected).ok()?;

        Some(SessionId(id.to_string()))
    }
}
