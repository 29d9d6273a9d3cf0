//! Best-effort license identification for bundled copyright files.
//!
//! - [`detect`] — finds an SPDX identifier in free-form copyright text.
//! - [`classifier`] — maps SPDX identifiers and expressions to a
//!   [`LicenseRisk`](crate::models::LicenseRisk).
//!
//! Nothing here changes what gets written to the bundle; the results only
//! feed the report.

pub mod classifier;
pub mod detect;
