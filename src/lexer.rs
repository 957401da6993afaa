mod token_kinds;
use std::{iter::Enumerate, slice::Iter};

use log::debug;
use logos::Logos;

pub use token_kinds::*;

/// Position of an argument within the argument vector
type ArgIndex = usize;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Token<'input> {
    /// How the argument was classified
    pub kind: TokenKind<'input>,
    /// The argument exactly as it was supplied
    pub raw: &'input str,
    /// Index into the argument vector this token was found at
    pub index: ArgIndex,
}

impl<'input> Token<'input> {
    pub fn classify(index: ArgIndex, raw: &'input str) -> Self {
        let mut markers = Marker::lexer(raw);
        let marker = markers.next();
        Self {
            kind: TokenKind::from_marked(marker, markers.remainder()),
            raw,
            index,
        }
    }

    /// The alias this token asks for. Unresolved flags are looked up by
    /// their raw text, free values never name an alias.
    pub fn candidate(&self) -> Option<&'input str> {
        match self.kind {
            TokenKind::Long(name) | TokenKind::Short(name) => Some(name),
            TokenKind::Unresolved => Some(self.raw),
            TokenKind::Free => None,
        }
    }

    #[inline]
    pub fn is_flag_shaped(&self) -> bool {
        self.kind.is_flag_shaped()
    }
}

/// Walks an argument vector, skipping the program name at index 0.
pub struct Tokenizer<'input> {
    args: Enumerate<Iter<'input, String>>,
}

impl<'input> Tokenizer<'input> {
    pub fn new(argv: &'input [String]) -> Self {
        let mut args = argv.iter().enumerate();
        args.next();
        Self { args }
    }
}

impl<'input> Iterator for Tokenizer<'input> {
    type Item = Token<'input>;

    fn next(&mut self) -> Option<Self::Item> {
        self.args.next().map(|(index, raw)| {
            let token = Token::classify(index, raw);
            debug!("classified argv[{index}] {raw:?} as {:?}", token.kind);
            token
        })
    }
}
