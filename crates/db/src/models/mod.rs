//! `FromRow` entity models and insert/update DTOs.

pub mod conversation;
pub mod expert_assignment;
pub mod expert_profile;
pub mod message;
pub mod session;
pub mod user;
