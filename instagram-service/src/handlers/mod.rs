//! HTTP handlers for the Instagram identity service.

pub mod health;
pub mod instagram;
pub mod service_info;

pub use health::health_check;
pub use instagram::process_instagram;
pub use service_info::service_info;
