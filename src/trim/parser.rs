//! Trim list string parsing
//!
//! Accepts the bracketed list syntax used on the command line: a single pair
//! like `[24,-24]` or a list of pairs like `[[None,3500],[4000,None]]`.
//! `None` and `null` are interchangeable.

use crate::error::{AudioCutError, AudioCutResult};
use crate::trim::{TrimList, TrimRange};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Comma,
    None,
    Number(i64),
}

struct Tokenizer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn error(&self, message: impl Into<String>) -> AudioCutError {
        AudioCutError::InvalidTrimList {
            input: self.input.to_string(),
            message: message.into(),
        }
    }

    fn next_token(&mut self) -> AudioCutResult<Option<Token>> {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }

        let Some(&(start, c)) = self.chars.peek() else {
            return Ok(None);
        };

        match c {
            '[' => {
                self.chars.next();
                Ok(Some(Token::Open))
            }
            ']' => {
                self.chars.next();
                Ok(Some(Token::Close))
            }
            ',' => {
                self.chars.next();
                Ok(Some(Token::Comma))
            }
            '-' | '0'..='9' => {
                let mut end = start;
                while let Some(&(i, c)) = self.chars.peek() {
                    if c == '-' && i != start {
                        break;
                    }
                    if c == '-' || c.is_ascii_digit() {
                        end = i + c.len_utf8();
                        self.chars.next();
                    } else {
                        break;
                    }
                }
                let text = &self.input[start..end];
                let value: i64 = text
                    .parse()
                    .map_err(|_| self.error(format!("invalid number '{}'", text)))?;
                Ok(Some(Token::Number(value)))
            }
            c if c.is_alphabetic() => {
                let mut end = start;
                while let Some(&(i, c)) = self.chars.peek() {
                    if c.is_alphabetic() {
                        end = i + c.len_utf8();
                        self.chars.next();
                    } else {
                        break;
                    }
                }
                let word = &self.input[start..end];
                match word {
                    "None" | "null" => Ok(Some(Token::None)),
                    other => Err(self.error(format!("unexpected word '{}'", other))),
                }
            }
            other => Err(self.error(format!("unexpected character '{}'", other))),
        }
    }

    fn tokenize(mut self) -> AudioCutResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> AudioCutError {
        AudioCutError::InvalidTrimList {
            input: self.input.to_string(),
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> AudioCutResult<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| self.error("unexpected end of input"))?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, expected: Token, what: &str) -> AudioCutResult<()> {
        let token = self.next()?;
        if token != expected {
            return Err(self.error(format!("expected {}", what)));
        }
        Ok(())
    }

    /// An endpoint is a number, `None`, or `null`
    fn endpoint(&mut self) -> AudioCutResult<Option<i64>> {
        match self.next()? {
            Token::Number(n) => Ok(Some(n)),
            Token::None => Ok(None),
            _ => Err(self.error("expected a frame number or None")),
        }
    }

    /// A pair body: `start , end` followed by `]` (the `[` is consumed by the caller)
    fn pair_body(&mut self) -> AudioCutResult<TrimRange> {
        let start = self.endpoint()?;
        self.expect(Token::Comma, "',' between trim endpoints")?;
        let end = self.endpoint()?;
        self.expect(Token::Close, "']' after trim pair")?;
        Ok(TrimRange::new(start, end))
    }

    fn parse(&mut self) -> AudioCutResult<TrimList> {
        self.expect(Token::Open, "'[' at start of trim list")?;

        let list = match self.peek() {
            // `[[...],[...]]` is a list of pairs
            Some(Token::Open) => {
                let mut ranges = Vec::new();
                loop {
                    self.expect(Token::Open, "'[' at start of trim pair")?;
                    ranges.push(self.pair_body()?);
                    match self.next()? {
                        Token::Comma => continue,
                        Token::Close => break,
                        _ => return Err(self.error("expected ',' or ']' after trim pair")),
                    }
                }
                TrimList::Multi(ranges)
            }
            // `[start,end]` is a single pair
            _ => TrimList::Single(self.pair_body()?),
        };

        if self.pos != self.tokens.len() {
            return Err(self.error("trailing input after trim list"));
        }
        Ok(list)
    }
}

/// Parse a trim list string into a [`TrimList`]
pub fn parse_trim_list(input: &str) -> AudioCutResult<TrimList> {
    let tokens = Tokenizer::new(input).tokenize()?;
    if tokens.is_empty() {
        return Err(AudioCutError::InvalidTrimList {
            input: input.to_string(),
            message: "empty input".to_string(),
        });
    }
    Parser {
        input,
        tokens,
        pos: 0,
    }
    .parse()
}
