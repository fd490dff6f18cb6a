pub mod ai_service; // Geocode + prompt + chat completion pipeline
pub mod location; // OpenCage reverse geocoding
pub mod openai; // OpenAI compatible chat completions
pub mod prompts;

pub use ai_service::AIService;
pub use location::{Geocoder, OpenCageClient};
pub use openai::{ChatCompletion, OpenAIClient};
