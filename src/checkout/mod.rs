//! Checkout engine for pull requests
//!
//! Three-phase pattern:
//! 1. Gather - read remotes, local state, and PR metadata (effectful, bounded)
//! 2. Plan - create `CheckoutPlan` (pure, testable)
//! 3. Execute - run git operations in order (effectful)

mod execute;
mod plan;

pub use execute::{CheckoutExecutionResult, NoopProgress, ProgressCallback, execute_checkout};
pub use plan::{
    CheckoutPlan, CheckoutTarget, GitOperation, choose_branch_name, create_checkout_plan,
    plan_operations,
};
