//! tally-core
//!
//! Quota policy, metrics engine, message catalog and credential handling.
//! Depends on tally-domain. No CLI, no terminal I/O, no direct file access:
//! persistence is reached through the traits in [`storage`].

pub mod catalog;
pub mod credential_service;
pub mod entry_service;
pub mod error;
pub mod metrics_service;
pub mod quota_service;
pub mod storage;
pub mod time;


pub use catalog::{suggestions, MessageCatalog};
pub use credential_service::*;
pub use entry_service::*;
pub use error::CoreError;
pub use metrics_service::*;
pub use quota_service::*;
pub use time::{Clock, FixedClock};
