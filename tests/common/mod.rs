//! Common test utilities and helpers
//!
//! Call-recording fakes for every collaborator port plus on-disk enlistment
//! fixtures shared by the integration tests.

#![allow(dead_code)]

pub mod mock_services;
pub mod test_fixtures;
