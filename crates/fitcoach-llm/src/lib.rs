pub mod gemini;
pub mod prompt;
pub mod traits;

pub use gemini::GeminiClient;
pub use prompt::{build_coach_prompt, welcome_message};
pub use traits::CoachClient;
