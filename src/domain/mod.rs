// Domain layer: catalog models, export settings and the ports the pipelines are built on.

pub mod model;
pub mod ports;
pub mod settings;
