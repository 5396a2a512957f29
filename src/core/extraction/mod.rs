//! Structured extraction of company details from page text

mod chat;
mod extractor;
mod prompt;


pub use chat::ChatExtractor;
pub use extractor::Extractor;
#[cfg(test)]
pub use extractor::MockExtractor;
pub use prompt::{ABOUT_PROMPT, FewShotExample, MIN_TEXT_LENGTH, few_shot_examples};
