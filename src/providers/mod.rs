pub mod gemini;
pub mod util;
