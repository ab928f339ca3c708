// Domain layer: dataset addressing, local dataset state, and the host port.

pub mod destination;
pub mod model;
pub mod ports;
