//! orgbot-router
//!
//! Decides between the fact table and the knowledge base for each question
//! and composes the final answer.
pub mod engine;
pub mod gate;
pub mod prompts;
pub mod router;
pub mod session;

pub use engine::AnswerEngine;
pub use gate::DomainGate;
pub use router::QueryRouter;
pub use session::{Session, Turn};
