//! The round workflow phases and their transition order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The 6 phases of a round, traversed strictly forward.
///
/// A round starts at [`AdmittingParticipants`](Self::AdmittingParticipants)
/// and ends at [`Tallied`](Self::Tallied); phases are never skipped and
/// never revisited within the same round. The derived `Ord` follows the
/// workflow order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SessionPhase {
    /// The authority admits participants into the round.
    AdmittingParticipants,
    /// Admitted participants may submit proposals.
    ProposalSubmissionOpen,
    /// Submissions are frozen; voting has not started yet.
    ProposalSubmissionClosed,
    /// Admitted participants may cast their single ballot.
    VotingOpen,
    /// Ballots are frozen; the winner has not been computed yet.
    VotingClosed,
    /// The winner is computed. Terminal: the next round may now be created.
    Tallied,
}

impl SessionPhase {
    /// The phase that follows this one, or `None` from the terminal phase.
    ///
    /// This is the complete transition table: a round's phase may only ever
    /// move to `self.next()`.
    pub fn next(self) -> Option<SessionPhase> {
        match self {
            Self::AdmittingParticipants => Some(Self::ProposalSubmissionOpen),
            Self::ProposalSubmissionOpen => Some(Self::ProposalSubmissionClosed),
            Self::ProposalSubmissionClosed => Some(Self::VotingOpen),
            Self::VotingOpen => Some(Self::VotingClosed),
            Self::VotingClosed => Some(Self::Tallied),
            Self::Tallied => None,
        }
    }

    /// Whether this is the terminal phase of a round.
    pub fn is_terminal(self) -> bool {
        self == Self::Tallied
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AdmittingParticipants => "admitting_participants",
            Self::ProposalSubmissionOpen => "proposal_submission_open",
            Self::ProposalSubmissionClosed => "proposal_submission_closed",
            Self::VotingOpen => "voting_open",
            Self::VotingClosed => "voting_closed",
            Self::Tallied => "tallied",
        };
        write!(f, "{name}")
    }
}
