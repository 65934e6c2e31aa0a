//! User domain model

use std::fmt;

use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// An HBCI banking user as registered with the external tool
///
/// Every field is passed through as an opaque string. An empty string means
/// "unset" and lets aqhbci-tool4 fall back to its own default.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
    pub bank_code: String,
    pub server_url: String,
    pub token_type: String,
    pub hbci_version: String,
    /// Desired HTTP version in `major.minor` form
    pub http_version: String,
    #[serde(skip_serializing)]
    pub pin: String,
}

impl User {
    pub fn new(id: impl Into<String>, bank_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bank_code: bank_code.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    pub fn with_hbci_version(mut self, hbci_version: impl Into<String>) -> Self {
        self.hbci_version = hbci_version.into();
        self
    }

    pub fn with_http_version(mut self, http_version: impl Into<String>) -> Self {
        self.http_version = http_version.into();
        self
    }

    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = pin.into();
        self
    }
}

// Keeps the PIN out of panics and debug logs
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("bank_code", &self.bank_code)
            .field("server_url", &self.server_url)
            .field("token_type", &self.token_type)
            .field("hbci_version", &self.hbci_version)
            .field("http_version", &self.http_version)
            .field("pin", &if self.pin.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// HTTP protocol version written into the user's settings file
///
/// Components are kept as the validated digit strings so they are written
/// back exactly as given, leading zeros included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpVersion {
    pub major: String,
    pub minor: String,
}

impl HttpVersion {
    pub fn new(major: impl Into<String>, minor: impl Into<String>) -> Self {
        Self {
            major: major.into(),
            minor: minor.into(),
        }
    }

    /// Parse a `major.minor` string
    ///
    /// Exactly two dot-separated components are accepted, each made of ASCII
    /// digits only.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::validation(format!("invalid http version: {:?}", s));

        let mut parts = s.split('.');
        let (major, minor) = match (parts.next(), parts.next(), parts.next()) {
            (Some(major), Some(minor), None) => (major, minor),
            _ => return Err(invalid()),
        };

        let component = |part: &str| -> Result<String> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            Ok(part.to_string())
        };

        Ok(Self {
            major: component(major)?,
            minor: component(minor)?,
        })
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
