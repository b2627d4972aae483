// Library surface shared by the terminal front end and the integration tests.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod metrics;
pub mod runtime;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod texts;
pub mod typing_policy;

pub use engine::{InputReport, TypingSession};
pub use error::SessionError;
pub use metrics::Metrics;
pub use session::{CharacterState, Status};
pub use typing_policy::{Keystroke, Outcome};
