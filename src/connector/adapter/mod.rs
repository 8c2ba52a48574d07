mod gemini_client;
mod mock_generator;

pub use gemini_client::*;
pub use mock_generator::*;
