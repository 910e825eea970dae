//! Interactive input tokenizer

use logos::Logos;
use std::io::{self, BufRead};

/// Token kinds of one input line
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Word {
    #[regex(r"[0-9]+", |lex| lex.slice().to_string(), priority = 3)]
    Number(String),

    #[regex(r"[^ \t\n\r\f]+", |lex| lex.slice().to_string())]
    Text(String),
}

impl Word {
    pub fn as_str(&self) -> &str {
        match self {
            Word::Number(s) | Word::Text(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Word::Number(s) | Word::Text(s) => s,
        }
    }
}

/// Split a line into whitespace-separated words
pub fn words(line: &str) -> Vec<Word> {
    // Every non-whitespace run matches `Text`, so the lexer never errors
    Word::lexer(line).filter_map(Result::ok).collect()
}

/// Line-oriented reader over the controller's input
pub struct Prompt<R> {
    input: R,
}

impl<R: BufRead> Prompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Next raw line, or `None` at end of input
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// First word of the next non-blank line; the rest of that line is dropped
    pub fn read_word(&mut self) -> io::Result<Option<Word>> {
        while let Some(line) = self.read_line()? {
            if let Some(word) = words(&line).into_iter().next() {
                return Ok(Some(word));
            }
        }
        Ok(None)
    }

    /// All words of the next line; an empty line yields no words
    pub fn read_words(&mut self) -> io::Result<Vec<String>> {
        Ok(self
            .read_line()?
            .map(|line| words(&line).into_iter().map(Word::into_string).collect())
            .unwrap_or_default())
    }
}
