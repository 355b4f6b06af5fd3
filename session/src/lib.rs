//! Multi-round collective decision workflow.
//!
//! 6-phase round lifecycle: Admitting → SubmissionOpen → SubmissionClosed →
//! VotingOpen → VotingClosed → Tallied. Phases only move forward and are
//! never skipped; a new round can be created only once the active one is
//! tallied.
//!
//! Key principle: one participant = one ballot, admission repeated per
//! round. The winner is the proposal with the most votes, ties broken by
//! lowest index. Index 0 of every round is a placeholder proposal, so it
//! wins exactly when no real proposal received any vote.

pub mod engine;
pub mod error;
pub mod events;
pub mod round;

pub use engine::SessionEngine;
pub use error::SessionError;
pub use events::{EventBus, SessionEvent};
pub use round::{Participant, Proposal, Round, RoundId, RoundView};
