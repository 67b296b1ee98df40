//! Core type definition module
//!
//! Request, response and error contracts shared by the router and provider
//! adapters.

pub mod errors;
pub mod message;
pub mod requests;
pub mod responses;

// Re-export all public types
pub use errors::{ChatError, ErrorCode};
pub use message::{ChatMessage, MessageRole};
pub use requests::{ChatRequest, ChatRequestBuilder, ResponseFormat};
pub use responses::{ChatResponse, NO_PROVIDER};
