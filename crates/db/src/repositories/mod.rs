//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Multi-statement mutations run inside a
//! single transaction.

pub mod assignment_repo;
pub mod conversation_repo;
pub mod expert_profile_repo;
pub mod message_repo;
pub mod session_repo;
pub mod user_repo;

pub use assignment_repo::AssignmentRepo;
pub use conversation_repo::ConversationRepo;
pub use expert_profile_repo::ExpertProfileRepo;
pub use message_repo::MessageRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
