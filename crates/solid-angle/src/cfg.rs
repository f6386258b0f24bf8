//! Tolerance defaults (internal).
//!
//! Policy
//! - Fixed constants, no runtime tolerance juggling. The estimators use exact
//!   zero tests where their contract demands it (zero distance, zero length);
//!   epsilons here only serve validation.

/// Relative triple-product magnitude below which a fan triangle counts as
/// edge-on: `|det| <= EDGE_ON_EPS * |v1| |v2| |v3|`.
pub(crate) const EDGE_ON_EPS: f64 = 1e-12;
