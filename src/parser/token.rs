use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Invalid,
    Eof,
    Identifier,
    Number,
    Emote,
    Bang,
    Dash,
    DoubleDash,
    Colon,
    Separator,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Invalid => "Invalid",
            TokenKind::Eof => "EOF",
            TokenKind::Identifier => "Identifier",
            TokenKind::Number => "Number",
            TokenKind::Emote => "Emote",
            TokenKind::Bang => "Bang",
            TokenKind::Dash => "Dash",
            TokenKind::DoubleDash => "DoubleDash",
            TokenKind::Colon => "Colon",
            TokenKind::Separator => "Separator",
        };

        f.write_str(name)
    }
}

/// A lexeme borrowed from the parsed input. `start..end` is the half-open byte
/// range of `text` inside that input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub start: usize,
    pub end: usize,
}

impl<'src> Token<'src> {
    pub fn eof(at: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: "",
            start: at,
            end: at,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Identifiers, emotes and numbers may all be part of a free-text name.
    pub fn is_word(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier | TokenKind::Emote | TokenKind::Number
        )
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}  {}:{}]", self.kind, self.start, self.end)
    }
}
