//! Provider wire formats.
//!
//! Request and response bodies exactly as each provider expects them, plus
//! the pure functions that build requests from caller input and map provider
//! responses back. Nothing in here performs I/O.

pub mod anthropic_types;
pub mod deepl_types;
pub mod openai_types;
pub mod request;
pub mod response;
