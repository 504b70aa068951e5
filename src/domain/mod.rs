// Domain layer: value types and ports (interfaces) the core logic depends on.

pub mod model;
pub mod ports;
