use logos::Logos;

/// The leading marker of a raw argument. Only the first lexeme of an
/// argument is ever inspected; everything after it is the candidate alias.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    #[token("--")]
    DoubleDash,
    #[token("-")]
    Dash,

    #[error]
    Unmarked,
}

/// How a single argument was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'input> {
    /// `--name`, where the name is at least two characters long
    Long(&'input str),
    /// `-x`, exactly one character after the dash
    Short(&'input str),
    /// Starts with a dash but fits neither shape, e.g. `-xy`, `--x` or `-`
    Unresolved,
    /// No marker at all
    Free,
}

impl<'input> TokenKind<'input> {
    pub fn from_marked(marker: Option<Marker>, rest: &'input str) -> Self {
        match marker {
            Some(Marker::DoubleDash) if rest.chars().count() >= 2 => TokenKind::Long(rest),
            Some(Marker::Dash) if rest.chars().count() == 1 => TokenKind::Short(rest),
            Some(Marker::DoubleDash) | Some(Marker::Dash) => TokenKind::Unresolved,
            Some(Marker::Unmarked) | None => TokenKind::Free,
        }
    }

    #[inline]
    pub fn is_flag_shaped(&self) -> bool {
        !matches!(self, TokenKind::Free)
    }
}
