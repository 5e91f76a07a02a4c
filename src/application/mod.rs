//! Application layer: collaborator ports, preflight gates, the verb frame and
//! the verbs themselves.

pub mod frame;
pub mod ports;
pub mod services;
pub mod use_cases;
