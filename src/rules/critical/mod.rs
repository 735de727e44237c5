pub mod blacklist;
pub mod budget_exceeded;
pub mod min_amount;

pub use blacklist::BlacklistRule;
pub use budget_exceeded::BudgetExceededRule;
pub use min_amount::MinAmountRule;
