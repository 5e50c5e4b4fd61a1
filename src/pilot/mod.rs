pub mod autopilot;

pub use autopilot::AutoPilot;
