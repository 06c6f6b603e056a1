use memchr::memchr;

use crate::constants::tag_separator;
use crate::error::DecodeError;

type Result<T> = std::result::Result<T, DecodeError>;

/// Forward-only reader over the serialized text. Positions are byte offsets.
pub(crate) struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn remaining(&self) -> &'a str {
        self.input.get(self.position..).unwrap_or("")
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn found_char(&self) -> char {
        self.remaining().chars().next().unwrap_or('\0')
    }

    /// Consumes one byte that must equal `expected`.
    pub fn expect(&mut self, expected: u8) -> Result<()> {
        match self.peek_byte() {
            Some(byte) if byte == expected => {
                self.position += 1;
                Ok(())
            }
            Some(_) => Err(DecodeError::Unexpected {
                expected: expected as char,
                found: self.found_char(),
                position: self.position,
            }),
            None => Err(DecodeError::Truncated {
                position: self.position,
            }),
        }
    }

    /// Consumes a fixed byte sequence such as `";`.
    pub fn expect_all(&mut self, expected: &[u8]) -> Result<()> {
        for &byte in expected {
            self.expect(byte)?;
        }
        Ok(())
    }

    /// Returns the token up to `delimiter` and moves past the delimiter.
    pub fn read_delimited(&mut self, delimiter: u8) -> Result<&'a str> {
        let start = self.position;
        let bytes = self.input.as_bytes();
        let offset = bytes
            .get(start..)
            .and_then(|rest| memchr(delimiter, rest))
            .ok_or(DecodeError::Truncated { position: start })?;
        let end = start + offset;
        self.position = end + 1;
        // `delimiter` is ASCII, so `end` sits on a char boundary.
        Ok(&self.input[start..end])
    }

    /// Reads the type indicator and the separator that tag requires. An
    /// unknown tag is returned with only the tag consumed so the caller can
    /// name it in its error.
    pub fn read_type_tag(&mut self) -> Result<(u8, usize)> {
        let position = self.position;
        let tag = self
            .peek_byte()
            .ok_or(DecodeError::Truncated { position })?;
        if !tag.is_ascii() {
            return Err(DecodeError::UnknownTag {
                tag: self.found_char(),
                position,
            });
        }
        self.position += 1;
        if let Some(separator) = tag_separator(tag) {
            self.expect(separator)?;
        }
        Ok((tag, position))
    }

    /// Reads `N:` followed by `opener`, returning `N`.
    pub fn read_length(&mut self, opener: u8) -> Result<usize> {
        let position = self.position;
        let token = self.read_delimited(b':')?;
        if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(DecodeError::MalformedNumber { position });
        }
        let length = token
            .parse::<usize>()
            .map_err(|_| DecodeError::MalformedNumber { position })?;
        self.expect(opener)?;
        Ok(length)
    }

    /// Reads an optionally signed integer terminated by `;`.
    pub fn read_int(&mut self) -> Result<i64> {
        let position = self.position;
        let token = self.read_delimited(b';')?;
        parse_int(token).ok_or(DecodeError::MalformedNumber { position })
    }

    /// Reads characters until their UTF-8 width adds up to `byte_len`, then
    /// consumes `closer`.
    pub fn read_string(&mut self, byte_len: usize, closer: &[u8]) -> Result<&'a str> {
        let start = self.position;
        let rest = self.remaining();
        let mut width = 0;
        let mut chars = rest.chars();
        while width < byte_len {
            match chars.next() {
                Some(ch) => width += ch.len_utf8(),
                None => return Err(DecodeError::Truncated { position: start }),
            }
        }
        if width != byte_len {
            return Err(DecodeError::SplitCharacter { position: start });
        }
        self.position = start + width;
        let value = &rest[..width];
        self.expect_all(closer)?;
        Ok(value)
    }
}

fn parse_int(token: &str) -> Option<i64> {
    let digits = token
        .strip_prefix('-')
        .or_else(|| token.strip_prefix('+'))
        .unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    token.parse::<i64>().ok()
}
