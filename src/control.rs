mod steering;

pub use steering::{SpeedProfile, SteeringCommand, SteeringConfig, SteeringController, lerp};
