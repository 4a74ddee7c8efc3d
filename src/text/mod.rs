//! Text processing for page statistics
//!
//! - `visible_text`: strips markup down to the text a reader would see
//! - `tokenize`: splits text into lowercase ASCII alphanumeric tokens
//! - `count_words`: applies the stop-word and length filters and counts tokens

mod html;
mod stopwords;
mod tokenizer;

pub use html::visible_text;
pub use stopwords::{is_stop_word, STOP_WORDS};
pub use tokenizer::{count_words, tokenize, PageWords};
