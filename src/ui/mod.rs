pub mod prompt;
pub mod progress;

pub use prompt::{ConfirmPrompt, PlanPrompt};
pub use progress::create_spinner;
