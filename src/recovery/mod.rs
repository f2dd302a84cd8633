//! Recovery planning.
//!
//! Given a classified kind and the destinations the host application
//! exposes, the planner produces the ordered list of recovery actions shown
//! on the recovery surface.

pub mod action;
pub mod planner;

pub use action::{ActionHandler, RecoveryAction, RecoveryActionType};
pub use planner::{candidates, plan, RecoveryPlanner, RecoveryUrls};
