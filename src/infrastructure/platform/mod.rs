//! Host integrations: service manager, antivirus and process privileges.

pub mod antivirus;
pub mod privileges;
pub mod service_controller;

pub use antivirus::DefenderExclusionProvider;
pub use privileges::ProcessPrivilegeProbe;
pub use service_controller::SystemServiceController;
