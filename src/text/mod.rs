//! Tokenized working text

mod token;

pub use token::{clean_word, Token, WorkingText};
