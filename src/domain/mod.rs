pub mod evidence;
pub mod ruleset;
pub mod snapshot;
pub mod verdict;

pub use evidence::Evidence;
pub use ruleset::{CriticalRules, RuleSet, TagLists, Thresholds};
pub use snapshot::TransactionSnapshot;
pub use verdict::{ApprovalNote, BlockReason, RejectReason, Severity, Verdict, WarnReason};
