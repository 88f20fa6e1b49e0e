// Domain layer: entity types and ports. No I/O here.

pub mod model;
pub mod ports;
