//! Argument tokenizer for command handlers.
//!
//! Splits a line into runs of non-delimiter characters. There is no quoting
//! or escaping: `"a b"` is two tokens, `"a` and `b"`.
//!
//! Tokens are slices of the input, which is never modified. The original
//! line stays readable through [`ArgTokenizer::input`] while tokenizing.

use std::iter::FusedIterator;

/// Token separators: space, tab, LF, VT, FF and CR.
pub const DEFAULT_DELIMITERS: &[char] = &[' ', '\t', '\n', '\x0B', '\x0C', '\r'];

/// Check if `c` is one of [`DEFAULT_DELIMITERS`].
#[inline]
pub fn is_delimiter(c: char) -> bool {
    DEFAULT_DELIMITERS.contains(&c)
}

/// A forward-only cursor over the tokens of an argument string.
///
/// Once [`next_token`](Self::next_token) returns `None` the tokenizer is
/// exhausted and stays that way until [`init`](Self::init) or
/// [`reset`](Self::reset).
///
/// # Examples
///
/// ```
/// use bevy_console_args::core::ArgTokenizer;
///
/// let mut args = ArgTokenizer::new("-pos 1 2 3 -a");
/// let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
/// let mut flag = false;
/// while let Some(token) = args.next_token() {
///     if args.compare_token(token, "-pos") {
///         args.next_vec3(&mut x, &mut y, &mut z);
///     } else if args.compare_token(token, "-A") {
///         flag = true;
///     }
/// }
/// assert_eq!((x, y, z, flag), (1.0, 2.0, 3.0, true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArgTokenizer<'a> {
    input: &'a str,
    /// Byte offset where the next scan resumes.
    cursor: usize,
    current: Option<&'a str>,
}

impl<'a> ArgTokenizer<'a> {
    /// Create a tokenizer positioned before the first token of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: 0,
            current: None,
        }
    }

    /// Rebind to a new input and rewind.
    pub fn init(&mut self, input: &'a str) {
        *self = Self::new(input);
    }

    /// Rewind to the start of the current input.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.current = None;
    }

    /// The full argument string, unchanged by tokenizing.
    #[inline]
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// The token returned by the last call to `next_token`.
    #[inline]
    pub fn current_token(&self) -> Option<&'a str> {
        self.current
    }

    /// The text not yet scanned.
    #[inline]
    pub fn remainder(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    /// Advance to the next token using [`DEFAULT_DELIMITERS`].
    #[inline]
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.next_token_with(DEFAULT_DELIMITERS)
    }

    /// Advance to the next token using a custom delimiter set.
    pub fn next_token_with(&mut self, delimiters: &[char]) -> Option<&'a str> {
        let rest = &self.input[self.cursor..];
        let Some(start) = rest.find(|c: char| !delimiters.contains(&c)) else {
            self.cursor = self.input.len();
            self.current = None;
            return None;
        };

        let tail = &rest[start..];
        let len = tail
            .find(|c: char| delimiters.contains(&c))
            .unwrap_or(tail.len());
        let token = &tail[..len];

        self.cursor += start + len;
        self.current = Some(token);
        Some(token)
    }

    /// Case-insensitive (ASCII) token comparison.
    #[inline]
    pub fn compare_token(&self, token: &str, literal: &str) -> bool {
        token.eq_ignore_ascii_case(literal)
    }

    /// Advance and parse the token as an integer.
    ///
    /// Returns `false` without touching `out` when no token is left.
    pub fn next_int(&mut self, out: &mut i32) -> bool {
        match self.next_token() {
            Some(token) => {
                *out = super::parse_int(token);
                true
            }
            None => false,
        }
    }

    /// Advance and parse the token as a float.
    ///
    /// Returns `false` without touching `out` when no token is left.
    pub fn next_float(&mut self, out: &mut f32) -> bool {
        match self.next_token() {
            Some(token) => {
                *out = super::parse_float(token);
                true
            }
            None => false,
        }
    }

    /// Parse two floats.
    ///
    /// Stops at the first missing token. Components parsed before the
    /// failure keep their new values.
    pub fn next_vec2(&mut self, x: &mut f32, y: &mut f32) -> bool {
        self.next_float(x) && self.next_float(y)
    }

    /// Parse three floats, with the same partial-failure behavior as
    /// [`next_vec2`](Self::next_vec2).
    pub fn next_vec3(&mut self, x: &mut f32, y: &mut f32, z: &mut f32) -> bool {
        self.next_float(x) && self.next_float(y) && self.next_float(z)
    }
}

impl<'a> Iterator for ArgTokenizer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl FusedIterator for ArgTokenizer<'_> {}
