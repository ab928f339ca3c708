// Adapters layer: concrete implementations of domain ports.

pub mod roboflow;

pub use roboflow::RoboflowClient;
