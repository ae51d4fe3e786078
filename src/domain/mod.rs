// Domain layer: core models and the data source port.

pub mod model;
pub mod ports;
