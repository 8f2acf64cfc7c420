//! Signed session tokens (JWT, HS256).

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use blog_core::ports::{AuthError, Session, SessionClaims, SessionService};

const DEV_SECRET: &str = "change-me-in-production";
const DEFAULT_TTL_HOURS: i64 = 24;
/// One year.
const MAX_TTL_HOURS: i64 = 24 * 365;

/// Session signing configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_hours: i64,
    pub issuer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            ttl_hours: DEFAULT_TTL_HOURS,
            issuer: "blog-server".to_string(),
        }
    }
}

impl SessionConfig {
    /// Load from `SECRET_KEY`, `SESSION_TTL_HOURS` and `SESSION_ISSUER`.
    pub fn from_env() -> Self {
        let secret = std::env::var("SECRET_KEY").unwrap_or_else(|_| DEV_SECRET.to_string());

        // Warn if using default secret in production
        if secret == DEV_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default session secret in production! Set SECRET_KEY environment variable."
                );
            } else {
                tracing::warn!("Using default session secret. Set SECRET_KEY for production use.");
            }
        }

        Self {
            secret,
            ttl_hours: ttl_hours(std::env::var("SESSION_TTL_HOURS").ok().as_deref()),
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "blog-server".to_string()),
        }
    }
}

/// Session lifetime from its raw setting; out-of-range or malformed values fall back to the default.
fn ttl_hours(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_TTL_HOURS;
    };

    match raw.trim().parse::<i64>() {
        Ok(hours) if (1..=MAX_TTL_HOURS).contains(&hours) => hours,
        _ => {
            tracing::warn!(
                value = raw,
                max = MAX_TTL_HOURS,
                "Ignoring invalid SESSION_TTL_HOURS, using {} hours",
                DEFAULT_TTL_HOURS
            );
            DEFAULT_TTL_HOURS
        }
    }
}

/// Wire claims. `sub` is the only identity carried.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    exp: i64,
    iat: i64,
    iss: String,
}

/// JWT-backed session service.
pub struct JwtSessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: SessionConfig,
}

impl JwtSessionService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.config.ttl_hours.saturating_mul(3600)
    }
}

impl SessionService for JwtSessionService {
    fn issue(&self, user_id: i32) -> Result<Session, AuthError> {
        let now = Utc::now();
        let exp = TimeDelta::try_hours(self.config.ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AuthError::InvalidSession("session lifetime out of range".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidSession(e.to_string()))?;

        Ok(Session {
            token,
            user_id,
            expires_in: self.ttl_seconds(),
        })
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
                _ => AuthError::InvalidSession(e.to_string()),
            }
        })?;

        let user_id = token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidSession("subject is not a user id".to_string()))?;

        Ok(SessionClaims { user_id })
    }
}
