// Domain layer: motion data and the ports the evaluators talk through.

pub mod model;
pub mod ports;
