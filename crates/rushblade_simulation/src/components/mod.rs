//! ECS components shared across domains
//!
//! - actor: Actor, Health, Player, Enemy
//! - physics: PhysicsBody (velocity, mass, damping)
//! - input: ActorInput, ActionButtons, InputLatch

pub mod actor;
pub mod input;
pub mod physics;

pub use actor::*;
pub use input::*;
pub use physics::*;
