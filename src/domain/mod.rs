// Domain layer: table models and ports. Only std/serde here, apart from the
// Canvas handle the Pipeline port passes between phases.

pub mod model;
pub mod ports;
