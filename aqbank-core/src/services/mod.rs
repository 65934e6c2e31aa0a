//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions.

pub mod http_version;
pub mod logging;
pub mod profile;
mod status;

pub use http_version::rewrite_http_version;
pub use logging::{LogEntry, LogEvent, LoggingService};
pub use profile::{default_tool_config_dir, ProfileManager};
pub use status::{StatusReport, StatusService};
