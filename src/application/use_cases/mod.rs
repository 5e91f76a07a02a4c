pub mod check_enlistment;
pub mod reconcile_config;
