// Domain layer: request/response models and the outbound email port.

pub mod model;
pub mod ports;
