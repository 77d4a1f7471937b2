pub mod gemini;
pub mod overpass;

pub use gemini::{build_prompt, extract_reply_text, GeminiClient};
pub use overpass::{FetchOutcome, OverpassClient};
