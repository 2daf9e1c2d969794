//! Line classifier automaton.
//!
//! One engine serves every classified language. It reads a physical line
//! left to right, one character at a time, never looking back, and splits
//! it into tokens: identifiers and numbers, one-character signs, and string
//! literals. A line is *operative* (a step) when at least one token was
//! completed on it. Comment text produces no tokens.
//!
//! The per-language differences live in the [`Syntax`] tables:
//!
//! - **Python**: `#` ends the line; a run of three `"` opens a comment
//!   block, so a triple-quoted string constant is treated as a comment too.
//!   Inside the block every `"` counts, adjacent or not and across lines,
//!   and the third one closes it. Two `"` followed by anything else form an
//!   empty string literal; a run still pending at line end is dropped.
//! - **C family**: `//` ends the line, `/* ... */` is a block comment,
//!   `\` escapes inside strings.
//! - **SQL**: `--` ends the line, `/* ... */` is a block comment, a doubled
//!   quote inside a literal stands for the quote itself.
//!
//! Only the block-comment condition survives a line boundary. A string left
//! open at the end of a line is emitted as a token and then abandoned.

use std::mem;

use super::syntax::{BlockComment, Escape, LineComment, Syntax};

/// Automaton state between two characters.
///
/// At a line boundary every state except [`ScanState::InBlockComment`]
/// collapses back to [`ScanState::Normal`]. A `/* */` block also forgets a
/// pending `*` there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Normal,
    /// One `/` seen; the next character decides whether a comment starts.
    PendingSlash,
    /// One `-` seen; a second one starts a line comment.
    PendingMinus,
    /// A run of one or two `"` seen outside strings and comments.
    QuoteRun(u8),
    /// Inside a string literal opened by `quote`.
    ///
    /// `escape` is set right after a backslash; `closing` is set right after
    /// a quote under the doubled-quote rule, when the literal may be over.
    InString {
        quote: char,
        escape: bool,
        closing: bool,
    },
    /// Inside a block comment; `run` counts progress toward the terminator
    /// (a pending `*`, or the number of `"` seen so far).
    InBlockComment { run: u8 },
}

impl ScanState {
    pub fn is_in_block_comment(&self) -> bool {
        matches!(self, ScanState::InBlockComment { .. })
    }

    /// The state carried into the next line.
    fn carried(self, kind: BlockComment) -> Self {
        match self {
            ScanState::InBlockComment { run } if kind == BlockComment::TripleQuote => {
                ScanState::InBlockComment { run }
            }
            ScanState::InBlockComment { .. } => ScanState::InBlockComment { run: 0 },
            _ => ScanState::Normal,
        }
    }

    fn string(quote: char) -> Self {
        ScanState::InString {
            quote,
            escape: false,
            closing: false,
        }
    }
}

/// The outcome of classifying one physical line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLine {
    /// Completed tokens, in order.
    pub tokens: Vec<String>,
}

impl ClassifiedLine {
    /// True iff the line completed at least one token.
    pub fn is_operative(&self) -> bool {
        !self.tokens.is_empty()
    }
}

/// Result of feeding one character.
enum Step {
    /// Character consumed; continue with the next one.
    Next(ScanState),
    /// Character not consumed; feed it again in the new state.
    Again(ScanState),
    /// The rest of the line is comment.
    Stop,
}

/// Tokens of the line being classified plus the open identifier and
/// literal buffers.
#[derive(Default)]
struct LineBuffer {
    tokens: Vec<String>,
    ident: String,
    literal: String,
}

impl LineBuffer {
    fn flush_ident(&mut self) {
        if !self.ident.is_empty() {
            self.tokens.push(mem::take(&mut self.ident));
        }
    }

    fn push_sign(&mut self, c: char) {
        self.tokens.push(c.to_string());
    }

    fn open_string(&mut self, quote: char) {
        self.literal.clear();
        self.literal.push(quote);
    }

    fn close_string(&mut self) {
        self.tokens.push(mem::take(&mut self.literal));
    }

    fn finish(mut self, state: ScanState) -> ClassifiedLine {
        match state {
            ScanState::PendingSlash => self.push_sign('/'),
            ScanState::PendingMinus => self.push_sign('-'),
            ScanState::InString { .. } => self.close_string(),
            ScanState::Normal | ScanState::QuoteRun(_) | ScanState::InBlockComment { .. } => {}
        }
        self.flush_ident();

        ClassifiedLine {
            tokens: self.tokens,
        }
    }
}

/// Classify one physical line starting from `state`.
///
/// The line is trimmed of surrounding whitespace first. Returns the
/// classified line and the state to carry into the next line.
pub fn classify_line(syntax: &Syntax, line: &str, state: ScanState) -> (ClassifiedLine, ScanState) {
    let mut buffer = LineBuffer::default();
    let mut state = state.carried(syntax.block_comment);

    'chars: for ch in line.trim().chars() {
        loop {
            match step(syntax, state, &mut buffer, ch) {
                Step::Next(next) => {
                    state = next;
                    continue 'chars;
                }
                Step::Again(next) => state = next,
                Step::Stop => {
                    state = ScanState::Normal;
                    break 'chars;
                }
            }
        }
    }

    let classified = buffer.finish(state);
    (classified, state.carried(syntax.block_comment))
}

fn step(syntax: &Syntax, state: ScanState, buffer: &mut LineBuffer, ch: char) -> Step {
    match state {
        ScanState::InBlockComment { run } => {
            Step::Next(block_comment_step(syntax.block_comment, run, ch))
        }
        ScanState::InString {
            quote,
            escape,
            closing,
        } => string_step(syntax.escape, quote, escape, closing, buffer, ch),
        ScanState::PendingSlash => match ch {
            '/' if syntax.line_comment == LineComment::DoubleSlash => Step::Stop,
            '*' if syntax.block_comment == BlockComment::SlashStar => {
                Step::Next(ScanState::InBlockComment { run: 0 })
            }
            _ => {
                buffer.push_sign('/');
                Step::Again(ScanState::Normal)
            }
        },
        ScanState::PendingMinus => {
            if ch == '-' {
                Step::Stop
            } else {
                buffer.push_sign('-');
                Step::Again(ScanState::Normal)
            }
        }
        ScanState::QuoteRun(run) => {
            if ch == '"' {
                if run + 1 >= 3 {
                    Step::Next(ScanState::InBlockComment { run: 0 })
                } else {
                    Step::Next(ScanState::QuoteRun(run + 1))
                }
            } else if run == 1 {
                // A lone `"`: an ordinary string literal has started.
                buffer.open_string('"');
                Step::Again(ScanState::string('"'))
            } else {
                buffer.tokens.push("\"\"".to_string());
                Step::Again(ScanState::Normal)
            }
        }
        ScanState::Normal => normal_step(syntax, buffer, ch),
    }
}

fn normal_step(syntax: &Syntax, buffer: &mut LineBuffer, ch: char) -> Step {
    match ch {
        c if Syntax::is_delimiter(c) => {
            buffer.flush_ident();
            Step::Next(ScanState::Normal)
        }
        '/' if syntax.has_slash_comments() => {
            buffer.flush_ident();
            Step::Next(ScanState::PendingSlash)
        }
        '-' if syntax.line_comment == LineComment::DoubleMinus => {
            buffer.flush_ident();
            Step::Next(ScanState::PendingMinus)
        }
        '"' if syntax.block_comment == BlockComment::TripleQuote => {
            buffer.flush_ident();
            Step::Next(ScanState::QuoteRun(1))
        }
        c if syntax.is_quote(c) => {
            buffer.flush_ident();
            buffer.open_string(c);
            Step::Next(ScanState::string(c))
        }
        '#' if syntax.line_comment == LineComment::Hash => {
            buffer.flush_ident();
            Step::Stop
        }
        '\\' if syntax.backslash_ends_line => {
            buffer.flush_ident();
            Step::Stop
        }
        c if syntax.is_sign(c) => {
            buffer.flush_ident();
            buffer.push_sign(c);
            Step::Next(ScanState::Normal)
        }
        c => {
            buffer.ident.push(c);
            Step::Next(ScanState::Normal)
        }
    }
}

fn block_comment_step(kind: BlockComment, run: u8, ch: char) -> ScanState {
    match kind {
        BlockComment::SlashStar => match (run, ch) {
            (1, '/') => ScanState::Normal,
            (_, '*') => ScanState::InBlockComment { run: 1 },
            _ => ScanState::InBlockComment { run: 0 },
        },
        BlockComment::TripleQuote => {
            if ch != '"' {
                ScanState::InBlockComment { run }
            } else if run + 1 >= 3 {
                ScanState::Normal
            } else {
                ScanState::InBlockComment { run: run + 1 }
            }
        }
    }
}

fn string_step(
    rule: Escape,
    quote: char,
    escape: bool,
    closing: bool,
    buffer: &mut LineBuffer,
    ch: char,
) -> Step {
    match rule {
        Escape::Backslash => {
            buffer.literal.push(ch);
            if escape {
                Step::Next(ScanState::string(quote))
            } else if ch == '\\' {
                Step::Next(ScanState::InString {
                    quote,
                    escape: true,
                    closing: false,
                })
            } else if ch == quote {
                buffer.close_string();
                Step::Next(ScanState::Normal)
            } else {
                Step::Next(ScanState::string(quote))
            }
        }
        Escape::Doubled => {
            if closing && ch != quote {
                buffer.close_string();
                return Step::Again(ScanState::Normal);
            }
            buffer.literal.push(ch);
            Step::Next(ScanState::InString {
                quote,
                escape: false,
                // `''` inside the literal: the second quote re-opens it.
                closing: ch == quote && !closing,
            })
        }
    }
}

/// A classifier bound to one syntax, carrying state from line to line.
///
/// Create one per file; feed it the file's lines in physical order.
#[derive(Debug)]
pub struct Classifier {
    syntax: &'static Syntax,
    state: ScanState,
}

impl Classifier {
    pub fn new(syntax: &'static Syntax) -> Self {
        Self {
            syntax,
            state: ScanState::Normal,
        }
    }

    /// Classify the next physical line of the file.
    pub fn classify(&mut self, line: &str) -> ClassifiedLine {
        let (classified, next) = classify_line(self.syntax, line, self.state);
        self.state = next;
        classified
    }

    /// Whether the previous line left a block comment open.
    pub fn is_in_block_comment(&self) -> bool {
        self.state.is_in_block_comment()
    }
}
