//! Client-side session token inspection.
//!
//! The dashboard only checks that the bearer token stored in the session
//! cookie is well formed and not past its `exp` claim. The signature is
//! **never** verified here: this check is a convenience that spares users a
//! round trip with a stale session, not a security boundary. Every backend
//! call made on behalf of the user must still be authorized server-side.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons a token payload could not be read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has no payload segment")]
    MissingPayload,
    #[error("payload is not valid base64")]
    InvalidEncoding,
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// What to do with tokens that carry no expiry claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingExpiry {
    /// Treat the token as valid indefinitely.
    #[default]
    Allow,
    /// Treat the token as expired.
    Reject,
}

/// Claims read from the token payload, used to label the session in the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionClaims {
    pub sub: Option<String>,
    pub email: Option<String>,
    pub nombre: Option<String>,
    pub rol: Option<String>,
    pub exp: Option<i64>,
}

/// Decides whether a session token is still usable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenExpiryGate {
    missing_expiry: MissingExpiry,
}

impl TokenExpiryGate {
    pub fn new(missing_expiry: MissingExpiry) -> Self {
        Self { missing_expiry }
    }

    /// Returns `true` when `token` decodes and has not expired yet.
    pub fn is_valid(&self, token: &str) -> bool {
        self.is_valid_at(token, Utc::now())
    }

    /// Same as [`Self::is_valid`] against an explicit clock.
    pub fn is_valid_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        match decode_payload(token) {
            Ok(payload) => self.payload_is_current(&payload, now),
            Err(err) => {
                log::debug!("Rejecting session token: {err}");
                false
            }
        }
    }

    /// Decodes the payload and returns its claims when the token is valid.
    pub fn validate(&self, token: &str) -> Option<SessionClaims> {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Option<SessionClaims> {
        let payload = decode_payload(token).ok()?;
        if !self.payload_is_current(&payload, now) {
            return None;
        }
        Some(SessionClaims::from_payload(payload))
    }

    fn payload_is_current(&self, payload: &Map<String, Value>, now: DateTime<Utc>) -> bool {
        match expiry_millis(payload.get("exp")) {
            Expiry::Missing => self.missing_expiry == MissingExpiry::Allow,
            Expiry::At(expires_at) => (now.timestamp_millis() as f64) < expires_at,
            Expiry::Malformed => false,
        }
    }
}

enum Expiry {
    Missing,
    At(f64),
    Malformed,
}

/// Reads the `exp` claim as milliseconds since the epoch.
///
/// Falsy claims (`null`, `0`, `false`, `""`) count as missing. A numeric
/// string is always an expiry, even when it parses to zero.
fn expiry_millis(claim: Option<&Value>) -> Expiry {
    let seconds = match claim {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return Expiry::Missing,
        Some(Value::Number(number)) => match number.as_f64() {
            Some(seconds) if seconds == 0.0 => return Expiry::Missing,
            other => other,
        },
        Some(Value::String(text)) if text.is_empty() => return Expiry::Missing,
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match seconds {
        Some(seconds) if seconds.is_finite() => Expiry::At(seconds * 1000.0),
        _ => Expiry::Malformed,
    }
}

/// Decodes the second dot-separated segment of `token` as a JSON object.
pub fn decode_payload(token: &str) -> Result<Map<String, Value>, TokenError> {
    let segment = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenError::MissingPayload)?;

    let bytes = decode_segment(segment)?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(payload)) => Ok(payload),
        Ok(_) => Err(TokenError::NotAnObject),
        Err(err) => Err(TokenError::InvalidJson(err.to_string())),
    }
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    let unpadded = segment.trim_end_matches('=');
    let engine = if unpadded.contains(|c: char| c == '-' || c == '_') {
        URL_SAFE_NO_PAD
    } else {
        STANDARD_NO_PAD
    };

    engine
        .decode(unpadded)
        .map_err(|_| TokenError::InvalidEncoding)
}

impl SessionClaims {
    fn from_payload(payload: Map<String, Value>) -> Self {
        let text = |key: &str| match payload.get(key) {
            Some(Value::String(value)) => Some(value.clone()),
            Some(Value::Number(value)) => Some(value.to_string()),
            _ => None,
        };

        Self {
            sub: text("sub"),
            email: text("email"),
            nombre: text("nombre").or_else(|| text("name")),
            rol: text("rol").or_else(|| text("role")),
            exp: payload.get("exp").and_then(Value::as_i64),
        }
    }

    /// Label shown for the signed-in user.
    pub fn display_name(&self) -> &str {
        self.nombre
            .as_deref()
            .or(self.email.as_deref())
            .or(self.sub.as_deref())
            .unwrap_or("Usuario")
    }
}
