pub mod adapter;
pub mod registry;

mod google;
mod openai;

pub use adapter::{
  request_completion, request_completion_by_name, ChatMessage, ProviderError, Role, FALLBACK_TEXT,
};
pub use registry::{Provider, ALL_PROVIDERS};
