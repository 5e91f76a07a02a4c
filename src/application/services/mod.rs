//! Preflight gates shared by every verb.

pub mod config_reconciler;
pub mod exclusion_enforcer;
pub mod remote_compatibility;
pub mod service_health;
pub mod version_gate;
