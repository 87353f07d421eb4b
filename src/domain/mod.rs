// Domain layer: value and wire types plus ports. No dependencies beyond std/serde.

pub mod model;
pub mod ports;
