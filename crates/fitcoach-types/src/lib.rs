pub mod chat;
pub mod profile;
pub mod user;

pub use chat::{ChatMessage, ChatThread, Sender, DEFAULT_THREAD_TITLE, TITLE_MAX_CHARS};
pub use profile::{BmiAnalysis, FitnessProfile, Sex};
pub use user::{Provider, PublicUser, User};
