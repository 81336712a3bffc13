use serde::Serialize;

/// Token kinds produced by the scanner.
///
/// Keywords are not distinguished here: every identifier-like word is a
/// `Name` and the parser matches keywords by (case-insensitive) text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Trivia
    Whitespace,
    Comment,
    DocumentComment,

    // Markup
    InlineHtml,
    OpenTag,
    OpenTagWithEcho,
    CloseTag,

    // Names and literals
    Name,
    VariableName,
    IntegerLiteral,
    FloatingLiteral,
    StringLiteral,
    Heredoc,
    CastOperator,

    // Punctuation
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Semicolon,
    Comma,
    Colon,
    ColonColon,
    Arrow,
    NullsafeArrow,
    FatArrow,
    Ellipsis,
    Dollar,

    // Operators
    Question,
    QuestionQuestion,
    Equals,
    CompoundAssignment,
    EqualsEquals,
    EqualsEqualsEquals,
    ExclamationEquals,
    ExclamationEqualsEquals,
    Exclamation,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
    Spaceship,
    Plus,
    Minus,
    Asterisk,
    AsteriskAsterisk,
    Slash,
    Percent,
    Dot,
    Ampersand,
    AmpersandAmpersand,
    Bar,
    BarBar,
    Caret,
    Tilde,
    At,
    PlusPlus,
    MinusMinus,
    LessThanLessThan,
    GreaterThanGreaterThan,
    Backtick,

    Unknown,
}

impl TokenKind {
    /// Whitespace and comments: kept in the tree, skipped by the parser.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocumentComment
        )
    }

    /// Tokens that are themselves complete expressions.
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::FloatingLiteral
                | TokenKind::StringLiteral
                | TokenKind::Heredoc
        )
    }
}

/// A scanned token: kind and byte span `[pos, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: u32,
    pub end: u32,
}

impl Token {
    pub fn new(kind: TokenKind, pos: u32, end: u32) -> Self {
        Token { kind, pos, end }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.pos
    }

    /// Source text of the token.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.pos as usize..self.end as usize).unwrap_or("")
    }
}
