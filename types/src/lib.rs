//! Fundamental types for the plenum decision engine.
//!
//! This crate defines the types shared across the workspace: member
//! addresses, the round phase enum, and tunable session parameters.

pub mod address;
pub mod params;
pub mod phase;

pub use address::MemberAddress;
pub use params::SessionParams;
pub use phase::SessionPhase;
