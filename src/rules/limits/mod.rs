pub mod category_budget;
pub mod total_budget;

pub use category_budget::{usage_percentage, CategoryBudgetRule, WARN_RATIO};
pub use total_budget::TotalBudgetRule;
