//! bursar-treasury
//!
//! Treasury-facing half of the core: walks the external proposal source to
//! find value already earmarked by in-flight governance, prices a single
//! membership unit against the non-allocated pool via the redemption-rate
//! curve, and routes redemptions (ownership check, burn, payout) through
//! the invoke primitive. Query helpers give human-readable views of queued
//! actions.

pub mod aggregator;
pub mod facade;
pub mod proposals;
pub mod query;
pub mod redemption;
pub mod registry;

pub use aggregator::allocated_treasury;
pub use facade::Treasury;
pub use proposals::{ProposalActions, ProposalSource, ProposalState};
pub use query::{ActionPhase, TimelockQuery};
pub use redemption::{mul_div, redemption_curve};
pub use registry::MembershipRegistry;
