//! HTTP version rewrite for aqhbci user settings
//!
//! Pure text transformation; the file I/O around it lives in the profile
//! manager.

use std::sync::OnceLock;

use regex::bytes::{Captures, Regex};

use crate::domain::HttpVersion;

/// Matches `httpVMajor="N"` / `httpVMinor="N"` with a single digit value
fn http_field_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"httpV(Major|Minor)="[0-9]""#).expect("http version pattern is valid")
    })
}

/// Rewrite every `httpVMajor`/`httpVMinor` field to `version`
///
/// All other bytes are left untouched. Content without any matching field
/// comes back unchanged.
pub fn rewrite_http_version(content: &[u8], version: &HttpVersion) -> Vec<u8> {
    http_field_regex()
        .replace_all(content, |caps: &Captures<'_>| {
            let value = if &caps[1] == b"Major" {
                &version.major
            } else {
                &version.minor
            };
            let kind = String::from_utf8_lossy(&caps[1]);
            format!("httpV{}=\"{}\"", kind, value).into_bytes()
        })
        .into_owned()
}
