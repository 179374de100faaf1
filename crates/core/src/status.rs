//! Well-known status constants.
//!
//! These must match the values stored in the `conversations.status` and
//! `expert_assignments.status` columns.

/// The conversation sits in the shared waiting queue with no assigned expert.
pub const CONVERSATION_WAITING: &str = "waiting";

/// The conversation has a currently assigned expert.
pub const CONVERSATION_ACTIVE: &str = "active";

/// The assignment record covers the expert's current claim.
pub const ASSIGNMENT_ACTIVE: &str = "active";

/// The claim episode ended (the expert unclaimed the conversation).
pub const ASSIGNMENT_RESOLVED: &str = "resolved";
