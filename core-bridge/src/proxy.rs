//! Proxy authentication.
//!
//! Builds the `Proxy-Authorization` header value the native HTTP stack
//! retries with when a proxy answers `407`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bridge_traits::configuration::{ProxyAuthenticator, ProxyChallenge};
use std::fmt;
use tracing::warn;

const PROXY_AUTHORIZATION_REQUIRED_STATUS_CODE: u16 = 407;

/// Challenge schemes answered with basic credentials.
const SUPPORTED_SCHEMES: &[&str] = &["Basic", "OkHttp-Preemptive"];

/// Answers basic-auth proxy challenges with a fixed username/password.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicProxyAuthenticator {
    username: String,
    password: String,
}

impl BasicProxyAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// `Basic <base64(username:password)>`.
    ///
    /// The credentials are encoded as ISO-8859-1 unless the challenge asks
    /// for UTF-8; characters outside Latin-1 become `?`.
    pub fn credential(&self, charset: Option<&str>) -> String {
        let plain = format!("{}:{}", self.username, self.password);
        let bytes = match charset {
            Some(charset) if charset.eq_ignore_ascii_case("utf-8") => plain.into_bytes(),
            _ => plain
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        };
        format!("Basic {}", STANDARD.encode(bytes))
    }
}

impl fmt::Debug for BasicProxyAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicProxyAuthenticator")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl ProxyAuthenticator for BasicProxyAuthenticator {
    fn authenticate(&self, status_code: u16, challenges: &[ProxyChallenge]) -> Option<String> {
        if status_code != PROXY_AUTHORIZATION_REQUIRED_STATUS_CODE {
            warn!(
                status_code,
                "Unexpected response code received during proxy authentication request"
            );
            return None;
        }

        let challenge = challenges.iter().find(|challenge| {
            SUPPORTED_SCHEMES
                .iter()
                .any(|scheme| challenge.scheme.eq_ignore_ascii_case(scheme))
        });

        match challenge {
            Some(challenge) => Some(self.credential(challenge.charset.as_deref())),
            None => {
                warn!("No known challenges are satisfied during proxy authentication request");
                None
            }
        }
    }
}
