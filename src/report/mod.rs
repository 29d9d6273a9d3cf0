//! Report renderers for a bundling run.
//!
//! - [`terminal`] — colored summary box and package tables; respects `--verbose` / `--quiet`.
//! - JSON output is the serialized [`BundleReport`](crate::models::BundleReport), printed from `main`.

pub mod terminal;
