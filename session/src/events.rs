//! Notifications emitted after each successful mutation, for subscribers.

use crate::round::RoundId;
use plenum_types::{MemberAddress, SessionPhase};

/// Session-level events that observers can subscribe to via the [`EventBus`].
///
/// One event is emitted per successful mutating call, in mutation order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A round was created and made active.
    RoundCreated {
        id: RoundId,
        name: String,
    },
    /// A member was admitted into a round.
    ParticipantAdmitted {
        round: RoundId,
        member: MemberAddress,
    },
    /// A round advanced to its next phase.
    PhaseChanged {
        round: RoundId,
        from: SessionPhase,
        to: SessionPhase,
    },
    /// A proposal was appended to a round.
    ProposalSubmitted {
        round: RoundId,
        index: u32,
    },
    /// A participant cast their ballot.
    VoteCast {
        round: RoundId,
        member: MemberAddress,
        index: u32,
    },
}

/// Synchronous fan-out event bus for session events.
///
/// Listeners are invoked inline on the mutating call; keep handlers fast to
/// avoid stalling the caller.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&SessionEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&SessionEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &SessionEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
