//! Per-line lexical classification of Go source.
//!
//! [`classify`] looks at one line of text together with the [`ScanState`]
//! left behind by the previous line and reports everything the accumulator
//! needs: whether the line is blank, a comment, or code with a trailing
//! comment, how many scopes it opens or closes, and whether it opens or
//! closes a block comment or a raw (backtick) string.
//!
//! This is a character-level approximation, not a parser. It knows about
//! `//` and `/* */` comments, `"..."` and `'...'` literals with backslash
//! escapes, and backtick raw strings that may span lines. Everything else is
//! code.

use crate::error::InvariantViolation;

const LINE_COMMENT: &str = "//";

/// Substrings that mark the start of an error-check block.
///
/// Matched case-sensitively and purely textually: the second spelling
/// catches `fooErr != nil` style names.
const ERROR_CHECK_IDIOMS: [&str; 2] = ["if err != nil", "Err != nil"];

/// Context carried from one line to the next within a single stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanState {
    /// Inside a `/* ... */` comment that has not been closed yet.
    pub in_block_comment: bool,
    /// Inside a backtick string that has not been closed yet.
    pub in_multiline_string: bool,
}

/// Everything [`classify`] found out about a single line.
///
/// These are independent flags rather than a single category because a line
/// can, for example, carry an inline comment, open a scope and start an
/// error check all at once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineClassification {
    pub is_whitespace: bool,
    pub is_only_comment: bool,
    pub is_inline_comment: bool,
    pub starts_error_check: bool,
    /// Scope openers minus scope closers found outside strings and comments.
    pub braces_delta: i64,
    pub starts_block_comment: bool,
    pub ends_block_comment: bool,
    pub starts_multiline_string: bool,
    pub ends_multiline_string: bool,
}

impl LineClassification {
    /// Verify the mutually exclusive flag pairs.
    pub fn check(&self) -> Result<(), InvariantViolation> {
        if self.is_only_comment && self.is_inline_comment {
            return Err(InvariantViolation::OnlyAndInlineComment);
        }
        if self.starts_block_comment && self.ends_block_comment {
            return Err(InvariantViolation::BlockCommentStartAndEnd);
        }
        if self.starts_multiline_string && self.ends_multiline_string {
            return Err(InvariantViolation::MultilineStringStartAndEnd);
        }
        Ok(())
    }

    /// The state the following line should be classified with.
    pub fn next_state(&self, state: ScanState) -> ScanState {
        let mut next = state;
        if self.starts_block_comment {
            next.in_block_comment = true;
        }
        if self.ends_block_comment {
            next.in_block_comment = false;
        }
        if self.starts_multiline_string {
            next.in_multiline_string = true;
        }
        if self.ends_multiline_string {
            next.in_multiline_string = false;
        }
        next
    }
}

/// Classify one line of source given the state left by the previous line.
///
/// # Example
///
/// ```rust
/// use goloclib::{classify, ScanState};
///
/// let line = classify("if err != nil { // bail out", ScanState::default());
/// assert!(line.starts_error_check);
/// assert!(line.is_inline_comment);
/// assert_eq!(line.braces_delta, 1);
/// ```
pub fn classify(line: &str, state: ScanState) -> LineClassification {
    let mut result = LineClassification::default();

    let text = line.trim();
    if text.is_empty() {
        result.is_whitespace = true;
        return result;
    }

    // Taken even when the previous line left a block comment or raw string
    // open, so `// old */` does not close the comment and a `//`-leading
    // line inside a raw string counts as a comment.
    if text.starts_with(LINE_COMMENT) {
        result.is_only_comment = true;
        return result;
    }

    let mut lexer = Lexer::new(state);
    let code = lexer.scan(text);

    if lexer.in_line_comment || !lexer.comment_spans.is_empty() {
        if lexer.residual(code).trim().is_empty() {
            result.is_only_comment = true;
        } else {
            result.is_inline_comment = true;
        }
    }

    result.starts_block_comment = lexer.in_block_comment;
    result.ends_block_comment = state.in_block_comment && !lexer.in_block_comment;
    result.starts_multiline_string = lexer.in_backtick;
    result.ends_multiline_string = state.in_multiline_string && !lexer.in_backtick;

    // Runs on the raw code text, so it can fire inside literals or an
    // already-open block comment.
    result.starts_error_check = ERROR_CHECK_IDIOMS
        .iter()
        .any(|idiom| code.contains(idiom));

    result.braces_delta = lexer.braces_delta;
    result
}

/// Character-level scanner state for a single line.
#[derive(Debug, Default)]
struct Lexer {
    in_block_comment: bool,
    in_line_comment: bool,
    in_double_quote: bool,
    in_single_quote: bool,
    in_backtick: bool,
    prev_was_escape: bool,
    braces_delta: i64,
    /// Byte offsets of characters belonging to block comments, ascending.
    comment_spans: Vec<usize>,
}

impl Lexer {
    fn new(state: ScanState) -> Self {
        Self {
            in_block_comment: state.in_block_comment,
            in_backtick: state.in_multiline_string,
            ..Default::default()
        }
    }

    fn in_string(&self) -> bool {
        self.in_double_quote || self.in_single_quote || self.in_backtick
    }

    /// Walk the line, returning it cut short at a trailing `//` comment.
    fn scan<'a>(&mut self, text: &'a str) -> &'a str {
        let bytes = text.as_bytes();

        for (i, c) in text.char_indices() {
            let next = bytes.get(i + 1).copied();
            let prev = i.checked_sub(1).and_then(|p| bytes.get(p).copied());

            // Both flags describe the line as it was before this character.
            let in_string = self.in_string();
            let in_comment = self.in_block_comment || self.in_line_comment;

            if c == '/' && !in_string && !in_comment && next == Some(b'/') {
                self.in_line_comment = true;
            }

            let opens_block = c == '/' && !in_string && !in_comment && next == Some(b'*');
            if opens_block {
                self.in_block_comment = true;
                self.comment_spans.push(i);
            }

            let closes_block =
                c == '/' && !in_string && self.in_block_comment && prev == Some(b'*');
            if closes_block {
                self.in_block_comment = false;
                self.comment_spans.push(i);
            }

            if in_comment {
                if !opens_block && !closes_block {
                    self.comment_spans.push(i);
                }
                continue;
            }

            let mut is_escape = false;
            match c {
                '"' if !in_string => self.in_double_quote = true,
                '"' if self.in_double_quote && !self.prev_was_escape => {
                    self.in_double_quote = false
                }
                '\'' if !in_string => self.in_single_quote = true,
                '\'' if self.in_single_quote && !self.prev_was_escape => {
                    self.in_single_quote = false
                }
                // Raw strings have no escapes.
                '`' if !in_string => self.in_backtick = true,
                '`' if self.in_backtick => self.in_backtick = false,
                '\\' if (self.in_double_quote || self.in_single_quote) && !self.prev_was_escape => {
                    is_escape = true
                }
                '{' if !in_string => self.braces_delta += 1,
                '}' if !in_string => self.braces_delta -= 1,
                _ => {}
            }
            self.prev_was_escape = is_escape;

            if self.in_line_comment {
                return &text[..i];
            }
        }

        text
    }

    /// The code text with every block-comment character removed.
    fn residual(&self, code: &str) -> String {
        code.char_indices()
            .filter(|(i, _)| self.comment_spans.binary_search(i).is_err())
            .map(|(_, c)| c)
            .collect()
    }
}
