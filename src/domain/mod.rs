// Domain layer: plain inventory data and the storage port. No terminal types here.

pub mod model;
pub mod ports;
