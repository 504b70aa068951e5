// Adapters layer: concrete implementations for external systems.

pub mod http_mail;
pub mod memory;
