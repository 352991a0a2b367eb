//! Line and token reading for turn input.
//!
//! Every game layout is a sequence of lines, each holding a fixed number of
//! space-separated tokens or a single raw string (map rows). [`TokenReader`]
//! tracks the line number so parse errors point at the offending line.

use crate::error::ParseError;
use std::io::BufRead;

/// Parse the integer prefix of a token the way JavaScript's `parseInt` does.
///
/// Leading whitespace is skipped, an optional sign is accepted, a `0x`/`0X`
/// prefix switches to hexadecimal, and digits are consumed up to the first
/// non-digit. Returns `None` when no digit is found or the value does not
/// fit in an `i32`.
#[must_use]
pub fn parse_int(token: &str) -> Option<i32> {
    let s = token.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x" | "0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

/// Reads input one line at a time, counting lines.
#[derive(Debug)]
pub struct TokenReader<R> {
    inner: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> TokenReader<R> {
    /// Wrap a buffered reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Check whether the input is exhausted without consuming anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails.
    pub fn at_eof(&mut self) -> Result<bool, ParseError> {
        Ok(self.inner.fill_buf()?.is_empty())
    }

    /// Read the next line with its terminator stripped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedEof`] if the input is exhausted.
    pub fn line(&mut self, field: &'static str) -> Result<String, ParseError> {
        self.buf.clear();
        let n = self.inner.read_line(&mut self.buf)?;
        self.line += 1;
        if n == 0 {
            return Err(ParseError::UnexpectedEof {
                line: self.line,
                field,
            });
        }
        let trimmed = self.buf.trim_end_matches(['\n', '\r']);
        Ok(trimmed.to_string())
    }

    /// Read the next line and split it into tokens.
    ///
    /// `what` names the record for end-of-input errors.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedEof`] if the input is exhausted.
    pub fn fields(&mut self, what: &'static str) -> Result<Fields, ParseError> {
        let text = self.line(what)?;
        Ok(Fields {
            line: self.line,
            tokens: text.split_whitespace().map(str::to_string).collect(),
            next: 0,
        })
    }

    /// Read a line holding a single integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is missing or not an integer.
    pub fn int(&mut self, field: &'static str) -> Result<i32, ParseError> {
        self.fields(field)?.int(field)
    }

    /// Read a line holding a single non-negative count.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is missing, not an integer, or negative.
    pub fn count(&mut self, field: &'static str) -> Result<usize, ParseError> {
        self.fields(field)?.count(field)
    }

    /// Read `n` raw lines, e.g. map rows.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedEof`] if fewer than `n` lines remain.
    pub fn rows(&mut self, n: usize, field: &'static str) -> Result<Vec<String>, ParseError> {
        (0..n).map(|_| self.line(field)).collect()
    }
}

/// Tokens of one input line, consumed left to right.
#[derive(Debug, Clone)]
pub struct Fields {
    line: usize,
    tokens: Vec<String>,
    next: usize,
}

impl Fields {
    /// Take the next token verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingToken`] if the line has no more tokens.
    pub fn word(&mut self, field: &'static str) -> Result<String, ParseError> {
        let token = self
            .tokens
            .get(self.next)
            .ok_or(ParseError::MissingToken {
                line: self.line,
                field,
            })?;
        self.next += 1;
        Ok(token.clone())
    }

    /// Take the next token as an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or has no integer prefix.
    pub fn int(&mut self, field: &'static str) -> Result<i32, ParseError> {
        let token = self.word(field)?;
        parse_int(&token).ok_or(ParseError::InvalidInteger {
            line: self.line,
            field,
            token,
        })
    }

    /// Take the next token as a non-negative count.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing, not an integer, or negative.
    pub fn count(&mut self, field: &'static str) -> Result<usize, ParseError> {
        let value = self.int(field)?;
        usize::try_from(value).map_err(|_| ParseError::NegativeCount {
            line: self.line,
            field,
            value,
        })
    }

    /// Take the next token as a boolean flag (`0` is false, anything else true).
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or not an integer.
    pub fn flag(&mut self, field: &'static str) -> Result<bool, ParseError> {
        Ok(self.int(field)? != 0)
    }
}
