//! Generation backend adapters

mod openai_compat;

pub use openai_compat::OpenAiCompatGateway;
