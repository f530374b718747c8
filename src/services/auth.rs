// src/services/auth.rs

//! Session token acquisition.

use std::thread;
use std::time::Duration;

use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::models::AuthConfig;
use crate::utils::{ApiEndpoints, Transport};

/// How long to keep asking for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    /// `None` retries until a token arrives.
    pub max_attempts: Option<u32>,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn forever() -> Self {
        Self::default()
    }

    pub fn limited(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            delay: Duration::ZERO,
        }
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

impl From<&AuthConfig> for RetryPolicy {
    fn from(config: &AuthConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            delay: config.retry_delay(),
        }
    }
}

/// Obtains an access token through the external-site-widget flow.
pub struct TokenAuthority<'a> {
    transport: &'a dyn Transport,
    endpoints: &'a ApiEndpoints,
    site: String,
    policy: RetryPolicy,
}

impl<'a> TokenAuthority<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        endpoints: &'a ApiEndpoints,
        site: impl Into<String>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            endpoints,
            site: site.into(),
            policy,
        }
    }

    /// Request a token, retrying failed attempts per the policy.
    pub fn acquire(&self) -> Result<String> {
        let url = self.endpoints.authentication()?;
        let payload = self.payload();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            match self.attempt(&url, &payload) {
                Ok(token) => {
                    log::info!("Access token acquired after {attempts} attempt(s)");
                    return Ok(token);
                }
                Err(e) => log::warn!("Token attempt {attempts} failed: {e}"),
            }

            if self.policy.exhausted(attempts) {
                return Err(AppError::Auth { attempts });
            }
            if !self.policy.delay.is_zero() {
                thread::sleep(self.policy.delay);
            }
        }
    }

    fn attempt(&self, url: &str, payload: &Value) -> Result<String> {
        let response = self.transport.post_json(url, payload)?;
        response
            .get("access_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("response has no access_token"))
    }

    fn payload(&self) -> Value {
        json!({
            "type": "external-site-widget",
            "credentials": {
                "referrer": self.site,
                "referer": self.site,
            }
        })
    }
}
