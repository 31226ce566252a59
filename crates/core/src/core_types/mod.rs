//! Core types and utilities

pub mod fuel;
pub mod math;
pub mod unit;
pub mod vec;

pub use fuel::FuelKind;
pub use unit::{FuelUnit, LayoutSlot, RigidBody};
pub use vec::{Vec2, Vec3};
