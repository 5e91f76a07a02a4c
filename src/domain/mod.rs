//! Domain layer: enlistment model, version types and the required git config.

pub mod entities;
pub mod value_objects;
