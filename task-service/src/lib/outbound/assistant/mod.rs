pub mod gemini;

pub use gemini::GeminiAssistant;
