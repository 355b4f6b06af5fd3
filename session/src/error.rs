use plenum_types::MemberAddress;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("caller {caller} is not the session authority")]
    Unauthorized { caller: MemberAddress },

    #[error("the active round is no longer admitting participants")]
    AdmissionNotOpen,

    #[error("proposal submission is not open in the active round")]
    ProposalSubmissionNotOpen,

    #[error("proposal submission has not been closed in the active round")]
    ProposalSubmissionNotClosed,

    #[error("voting is not open in the active round")]
    VotingNotOpen,

    #[error("voting has not been closed in the active round")]
    VotingNotClosed,

    #[error("the active round has not been tallied yet")]
    RoundNotFinished,

    #[error("member is already admitted to the active round")]
    AlreadyAdmitted,

    #[error("member has already cast a ballot in the active round")]
    AlreadyVoted,

    #[error("caller is not an admitted participant of the active round")]
    NotAParticipant,

    #[error("proposal text must not be empty")]
    EmptyProposalText,

    #[error("proposal text is {len} bytes, the limit is {max}")]
    ProposalTextTooLong { len: usize, max: usize },

    #[error("the active round already holds the maximum of {max} proposals")]
    TooManyProposals { max: usize },

    #[error("proposal {0} not found in the active round")]
    ProposalNotFound(u32),
}
