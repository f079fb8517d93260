use bursar_core::error::BursarError;
use bursar_core::types::{Balance, Identity};
use serde::{Deserialize, Serialize};

/// Lifecycle state of one external governance proposal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProposalState {
    Pending,
    Active,
    Canceled,
    Defeated,
    Succeeded,
    Queued,
    Expired,
    Executed,
}

impl ProposalState {
    /// Whether the proposal can still spend: its earmarked value is
    /// excluded from the redeemable pool.
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            ProposalState::Pending | ProposalState::Active | ProposalState::Queued
        )
    }
}

/// The action list of one proposal: parallel arrays of equal length.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProposalActions {
    pub targets: Vec<Identity>,
    pub values: Vec<Balance>,
    pub signatures: Vec<String>,
    pub datas: Vec<Vec<u8>>,
}

/// The external governance contract that owns proposal records.
pub trait ProposalSource {
    /// Number of proposals ever created; indices run over `[0, count)`.
    fn proposal_count(&self) -> Result<u64, BursarError>;

    /// Lifecycle state of the proposal at `index`.
    fn state(&self, index: u64) -> Result<ProposalState, BursarError>;

    /// Action list of the proposal at `index`.
    fn actions(&self, index: u64) -> Result<ProposalActions, BursarError>;
}
