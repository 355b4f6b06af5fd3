//! Tunable session parameters.

use serde::{Deserialize, Serialize};

/// Bounds applied to every round of a session.
///
/// The defaults are the canonical limits; hosts embedding the engine can
/// tighten or relax them at construction time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionParams {
    /// Maximum number of proposals per round, including the placeholder at
    /// index 0. Default: 1000.
    pub max_proposals: usize,

    /// Maximum length of a submitted proposal text, in bytes.
    /// Default: 999.
    pub max_proposal_text_len: usize,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            max_proposals: 1000,
            max_proposal_text_len: 999,
        }
    }
}
