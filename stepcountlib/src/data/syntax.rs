//! Sign and syntax tables for the supported source languages.
//!
//! Each [`LanguageVariant`] that is classified line by line owns one
//! immutable [`Syntax`] table: which characters are one-character sign
//! tokens, which characters open string literals, and which comment and
//! escape rules apply. The automaton in [`super::automaton`] is driven
//! entirely by these tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Characters that separate tokens without becoming tokens themselves.
///
/// Space, horizontal tab and the ideographic (full-width) space.
pub const DELIMITERS: [char; 3] = [' ', '\t', '\u{3000}'];

/// The source syntaxes a file can be scanned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LanguageVariant {
    /// `#` line comments, `"""` comment blocks
    PythonLike,
    /// `//` line comments, `/* */` block comments (C, C++, Java)
    CFamily,
    /// `--` line comments, `/* */` block comments, doubled-quote escapes
    SqlLike,
    /// No classification; lines are counted but steps are not
    PlainText,
}

impl LanguageVariant {
    /// All variants, in report order.
    pub const ALL: [LanguageVariant; 4] = [
        LanguageVariant::PythonLike,
        LanguageVariant::CFamily,
        LanguageVariant::SqlLike,
        LanguageVariant::PlainText,
    ];

    /// The syntax table driving this variant, or `None` for plain text.
    pub fn syntax(self) -> Option<&'static Syntax> {
        match self {
            LanguageVariant::PythonLike => Some(&PYTHON),
            LanguageVariant::CFamily => Some(&C_FAMILY),
            LanguageVariant::SqlLike => Some(&SQL),
            LanguageVariant::PlainText => None,
        }
    }

    /// Whether files of this variant get a step count.
    pub fn counts_steps(self) -> bool {
        self.syntax().is_some()
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            LanguageVariant::PythonLike => "Python",
            LanguageVariant::CFamily => "C/Java",
            LanguageVariant::SqlLike => "SQL",
            LanguageVariant::PlainText => "Text",
        }
    }
}

impl fmt::Display for LanguageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// How a line comment is introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineComment {
    /// `#`
    Hash,
    /// `//`
    DoubleSlash,
    /// `--`
    DoubleMinus,
}

/// How a block comment is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockComment {
    /// A run of three `"` enters the block; the next run of three leaves it.
    TripleQuote,
    /// `/*` enters, `*/` leaves.
    SlashStar,
}

/// How a quote character is escaped inside a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// `\` escapes the next character.
    Backslash,
    /// The quote character written twice stands for itself.
    Doubled,
}

/// Immutable per-language lexical configuration.
#[derive(Debug)]
pub struct Syntax {
    /// Characters that always form a one-character token.
    pub signs: &'static [char],
    /// Characters that open (and close) a string literal.
    pub quotes: &'static [char],
    pub line_comment: LineComment,
    pub block_comment: BlockComment,
    pub escape: Escape,
    /// A `\` outside a string literal ends scanning of the line.
    pub backslash_ends_line: bool,
}

impl Syntax {
    pub fn is_sign(&self, c: char) -> bool {
        self.signs.contains(&c)
    }

    pub fn is_quote(&self, c: char) -> bool {
        self.quotes.contains(&c)
    }

    pub fn is_delimiter(c: char) -> bool {
        DELIMITERS.contains(&c)
    }

    /// Whether `/` may start a comment in this syntax.
    pub fn has_slash_comments(&self) -> bool {
        self.line_comment == LineComment::DoubleSlash
            || self.block_comment == BlockComment::SlashStar
    }
}

pub static PYTHON: Syntax = Syntax {
    signs: &[
        '!', '$', '%', '&', '(', ')', '=', '^', '~', '|', '@', '`', '[', '{', ';', '+', ':', ']',
        '}', ',', '<', '.', '>', '?', '-', '/', '*',
    ],
    quotes: &['\'', '"'],
    line_comment: LineComment::Hash,
    block_comment: BlockComment::TripleQuote,
    escape: Escape::Backslash,
    backslash_ends_line: true,
};

pub static C_FAMILY: Syntax = Syntax {
    signs: &[
        '!', '$', '%', '&', '(', ')', '=', '^', '~', '|', '@', '`', '[', '{', ';', '+', ':', ']',
        '}', ',', '<', '.', '>', '?', '-', '#', '*',
    ],
    quotes: &['\'', '"'],
    line_comment: LineComment::DoubleSlash,
    block_comment: BlockComment::SlashStar,
    escape: Escape::Backslash,
    backslash_ends_line: true,
};

pub static SQL: Syntax = Syntax {
    signs: &[
        '!', '$', '%', '&', '(', ')', '=', '^', '~', '|', '@', '`', '[', '{', ';', '+', ':', ']',
        '}', ',', '<', '.', '>', '?', '#', '*',
    ],
    quotes: &['\'', '"'],
    line_comment: LineComment::DoubleMinus,
    block_comment: BlockComment::SlashStar,
    escape: Escape::Doubled,
    backslash_ends_line: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_syntax() {
        assert!(LanguageVariant::PlainText.syntax().is_none());
        assert!(!LanguageVariant::PlainText.counts_steps());
        assert!(LanguageVariant::SqlLike.counts_steps());
    }

    #[test]
    fn comment_characters_are_not_signs() {
        assert!(!PYTHON.is_sign('#'));
        assert!(!C_FAMILY.is_sign('/'));
        assert!(!SQL.is_sign('-'));
        assert!(!SQL.is_sign('/'));
    }

    #[test]
    fn hash_is_a_sign_outside_python() {
        assert!(C_FAMILY.is_sign('#'));
        assert!(SQL.is_sign('#'));
    }

    #[test]
    fn underscore_belongs_to_identifiers() {
        for variant in LanguageVariant::ALL {
            if let Some(syntax) = variant.syntax() {
                assert!(!syntax.is_sign('_'), "{variant}");
                assert!(!syntax.is_sign('"'), "{variant}");
                assert!(!syntax.is_sign('\''), "{variant}");
                assert!(!syntax.is_sign('\\'), "{variant}");
            }
        }
    }

    #[test]
    fn full_width_space_is_a_delimiter() {
        assert!(Syntax::is_delimiter('\u{3000}'));
        assert!(Syntax::is_delimiter('\t'));
        assert!(!Syntax::is_delimiter('\n'));
    }

    #[test]
    fn slash_comments() {
        assert!(!PYTHON.has_slash_comments());
        assert!(C_FAMILY.has_slash_comments());
        assert!(SQL.has_slash_comments());
    }
}
