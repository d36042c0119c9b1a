//! tally-domain
//!
//! Pure domain models (Entry, Tenant, Tier, reports, time buckets).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod entry;
pub mod locale;
pub mod report;
pub mod tenant;

pub use entry::*;
pub use locale::*;
pub use report::*;
pub use tenant::*;
