pub mod extractor;
pub mod prompt;
pub mod provider;
pub mod providers;

pub use extractor::{BlockOutcome, BlockResult, BlockStatus, TermExtractor};
pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::{create_provider, ProviderRegistry};
