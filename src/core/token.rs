//! Gem tokens and where fresh ones come from.
//!
//! `Token` is the closed alphabet of gem kinds. Tokens only compare for
//! equality; there is no ordering between kinds that matters to the rules.
//!
//! Fresh tokens (initial fill, gravity refill) are drawn through the
//! [`TokenSource`] trait so that tests can script exact cascades while play
//! uses a seeded [`RandomTokens`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::rng::GameRng;
use crate::grid::Color;

/// A gem kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Token {
    Ruby,
    Sapphire,
    Emerald,
    Topaz,
    Amethyst,
    Pearl,
}

impl Token {
    /// Every gem kind, in glyph order.
    pub const ALL: [Token; 6] = [
        Token::Ruby,
        Token::Sapphire,
        Token::Emerald,
        Token::Topaz,
        Token::Amethyst,
        Token::Pearl,
    ];

    /// Single-character board glyph (`A`..`F`).
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Token::Ruby => 'A',
            Token::Sapphire => 'B',
            Token::Emerald => 'C',
            Token::Topaz => 'D',
            Token::Amethyst => 'E',
            Token::Pearl => 'F',
        }
    }

    /// Parse a board glyph back into a token.
    #[must_use]
    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.glyph() == glyph.to_ascii_uppercase())
    }

    /// Default foreground color for this gem.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Token::Ruby => Color::Red,
            Token::Sapphire => Color::Blue,
            Token::Emerald => Color::Green,
            Token::Topaz => Color::Yellow,
            Token::Amethyst => Color::Magenta,
            Token::Pearl => Color::White,
        }
    }

    /// The first `kinds` tokens of the alphabet.
    ///
    /// Panics if `kinds` is zero or larger than the alphabet.
    #[must_use]
    pub fn alphabet(kinds: usize) -> &'static [Token] {
        assert!(
            (1..=Self::ALL.len()).contains(&kinds),
            "gem kinds must be 1-{}",
            Self::ALL.len()
        );
        &Self::ALL[..kinds]
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Supplier of fresh tokens for board fills and refills.
pub trait TokenSource {
    /// Produce the next token.
    fn next_token(&mut self) -> Token;
}

/// Uniform random tokens from a seeded [`GameRng`].
#[derive(Clone, Debug)]
pub struct RandomTokens {
    rng: GameRng,
    alphabet: &'static [Token],
}

impl RandomTokens {
    /// Draw from the first `kinds` gems using the given seed.
    #[must_use]
    pub fn new(seed: u64, kinds: usize) -> Self {
        Self::from_rng(GameRng::new(seed), kinds)
    }

    /// Draw from the first `kinds` gems using an existing RNG.
    #[must_use]
    pub fn from_rng(rng: GameRng, kinds: usize) -> Self {
        Self {
            rng,
            alphabet: Token::alphabet(kinds),
        }
    }

    /// The tokens this source can produce.
    #[must_use]
    pub fn alphabet(&self) -> &'static [Token] {
        self.alphabet
    }
}

impl TokenSource for RandomTokens {
    fn next_token(&mut self) -> Token {
        // The alphabet always holds at least 3 gems
        self.rng.pick(self.alphabet).unwrap_or(Token::Ruby)
    }
}

/// A fixed token sequence, replayed in order and cycled when exhausted.
///
/// Used to force specific refills, e.g. a cascade of a known length.
#[derive(Clone, Debug)]
pub struct ScriptedTokens {
    script: VecDeque<Token>,
}

impl ScriptedTokens {
    /// Create a scripted source.
    ///
    /// Panics if `script` is empty.
    pub fn new(script: impl IntoIterator<Item = Token>) -> Self {
        let script: VecDeque<Token> = script.into_iter().collect();
        assert!(!script.is_empty(), "Scripted token source needs at least one token");
        Self { script }
    }

    /// Create a scripted source from board glyphs.
    ///
    /// Unknown glyphs are skipped.
    pub fn from_glyphs(glyphs: &str) -> Self {
        Self::new(glyphs.chars().filter_map(Token::from_glyph))
    }
}

impl TokenSource for ScriptedTokens {
    fn next_token(&mut self) -> Token {
        // Rotate so the sequence cycles
        let token = self.script[0];
        self.script.rotate_left(1);
        token
    }
}
