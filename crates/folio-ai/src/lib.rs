pub mod provider;
pub mod providers;
pub mod session;

pub use provider::ChatProvider;
pub use providers::google::{GoogleGenAiProvider, DEFAULT_MODEL};
pub use session::{portfolio_context, ChatMessage, ChatRole, ChatSession, WELCOME_MESSAGE};
