//! Whitespace-separated token reader shared by the instance parsers

use crate::error::ParseError;

pub(crate) struct Tokens<'a> {
    input: &'a str,
    offset: usize,
    position: usize,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Tokens { input, offset: 0, position: 0 }
    }

    fn next_raw(&mut self) -> Option<&'a str> {
        let rest = &self.input[self.offset..];
        let start = rest.find(|c: char| !c.is_whitespace())?;
        let len = rest[start..]
            .find(char::is_whitespace)
            .unwrap_or(rest.len() - start);
        self.offset += start + len;
        self.position += 1;
        Some(&rest[start..start + len])
    }

    pub(crate) fn next_int(&mut self, expected: &'static str) -> Result<i64, ParseError> {
        let token = self.next_raw().ok_or(ParseError::UnexpectedEof { expected })?;
        token.parse().map_err(|_| ParseError::InvalidInteger {
            token: token.to_string(),
            position: self.position,
        })
    }

    /// Next `count` non-whitespace characters, regardless of token boundaries.
    /// Storage grows with the characters actually read, never with `count`.
    pub(crate) fn next_chars(&mut self, count: usize, expected: &'static str) -> Result<Vec<char>, ParseError> {
        let mut chars = Vec::with_capacity(count.min(self.input.len() - self.offset));
        while chars.len() < count {
            let rest = &self.input[self.offset..];
            let Some((start, c)) = rest.char_indices().find(|(_, c)| !c.is_whitespace()) else {
                return Err(ParseError::UnexpectedEof { expected });
            };
            // A character preceded by whitespace opens a new token.
            if start > 0 || self.offset == 0 {
                self.position += 1;
            }
            self.offset += start + c.len_utf8();
            chars.push(c);
        }
        Ok(chars)
    }

    /// Fail if anything but whitespace is left
    pub(crate) fn finish(mut self) -> Result<(), ParseError> {
        match self.next_raw() {
            Some(token) => Err(ParseError::TrailingInput {
                token: token.to_string(),
                position: self.position,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_integers_across_lines() {
        let mut tokens = Tokens::new("  3 4\n-5\t6 ");
        assert_eq!(tokens.next_int("a"), Ok(3));
        assert_eq!(tokens.next_int("b"), Ok(4));
        assert_eq!(tokens.next_int("c"), Ok(-5));
        assert_eq!(tokens.next_int("d"), Ok(6));
        assert_eq!(tokens.next_int("e"), Err(ParseError::UnexpectedEof { expected: "e" }));
    }

    #[test]
    fn test_invalid_integer_reports_position() {
        let mut tokens = Tokens::new("1 x2");
        tokens.next_int("a").unwrap();
        assert_eq!(
            tokens.next_int("b"),
            Err(ParseError::InvalidInteger { token: "x2".to_string(), position: 2 })
        );
    }

    #[test]
    fn test_chars_ignore_token_boundaries() {
        let mut tokens = Tokens::new("2 3\nHO.\n N C H\n");
        tokens.next_int("h").unwrap();
        tokens.next_int("w").unwrap();
        let chars = tokens.next_chars(6, "cells").unwrap();
        assert_eq!(chars, vec!['H', 'O', '.', 'N', 'C', 'H']);
        assert!(tokens.finish().is_ok());
    }

    #[test]
    fn test_huge_char_count_fails_without_allocating() {
        let mut tokens = Tokens::new("HO");
        assert_eq!(
            tokens.next_chars(usize::MAX, "cells"),
            Err(ParseError::UnexpectedEof { expected: "cells" })
        );
    }

    #[test]
    fn test_finish_rejects_trailing_tokens() {
        let mut tokens = Tokens::new("1 2 3");
        tokens.next_int("a").unwrap();
        tokens.next_int("b").unwrap();
        assert_eq!(
            tokens.finish(),
            Err(ParseError::TrailingInput { token: "3".to_string(), position: 3 })
        );
    }
}
