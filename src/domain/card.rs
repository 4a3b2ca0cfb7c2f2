use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::CardId;

/// Масть карты. Порядок вариантов = канонический порядок ♠ ♥ ♦ ♣.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    #[serde(alias = "♠", alias = "S")]
    Spades,
    #[serde(alias = "♥", alias = "H")]
    Hearts,
    #[serde(alias = "♦", alias = "D")]
    Diamonds,
    #[serde(alias = "♣", alias = "C")]
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '♠' | 's' | 'S' => Some(Suit::Spades),
            '♥' | 'h' | 'H' => Some(Suit::Hearts),
            '♦' | 'd' | 'D' => Some(Suit::Diamonds),
            '♣' | 'c' | 'C' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

/// Ранг карты. В баккаре туз младший (1 очко).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Очки карты: A = 1, 2..9 = номинал, 10/J/Q/K = 0.
    pub const fn point(self) -> u8 {
        match self {
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 0,
            r => r as u8,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        let rank = match s {
            "A" | "a" | "1" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" | "t" => Rank::Ten,
            "J" | "j" => Rank::Jack,
            "Q" | "q" => Rank::Queen,
            "K" | "k" => Rank::King,
            _ => return None,
        };
        Some(rank)
    }
}

/// Цвет рубашки/маркировки. Независим от масти, назначается в самом конце.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardColor {
    Red,
    Black,
}

impl CardColor {
    pub const fn code(self) -> char {
        match self {
            CardColor::Red => 'R',
            CardColor::Black => 'B',
        }
    }
}

/// Лицо карты: пара (ранг, масть) без привязки к позиции в шузе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct CardFace {
    pub rank: Rank,
    pub suit: Suit,
}

impl CardFace {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("Пустая строка вместо карты")]
    Empty,
    #[error("Неизвестный ранг: {0}")]
    InvalidRank(String),
    #[error("Неизвестная масть: {0}")]
    InvalidSuit(char),
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for CardFace {
    /// Формат вида `3♣`, `10♦`, `K♠`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строки вида "3♣", "10♦", "Td", "kS".
impl FromStr for CardFace {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit_ch = s.chars().last().ok_or(CardParseError::Empty)?;
        let rank_part = &s[..s.len() - suit_ch.len_utf8()];

        let suit = Suit::from_char(suit_ch).ok_or(CardParseError::InvalidSuit(suit_ch))?;
        let rank =
            Rank::parse(rank_part).ok_or_else(|| CardParseError::InvalidRank(rank_part.to_string()))?;

        Ok(CardFace { rank, suit })
    }
}

/// Парсинг масти: символ (`♥`), буква (`h`, `H`) или имя (`hearts`).
impl FromStr for Suit {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(CardParseError::Empty),
            (Some(ch), None) => Suit::from_char(ch).ok_or(CardParseError::InvalidSuit(ch)),
            (Some(ch), Some(_)) => match s.to_ascii_lowercase().as_str() {
                "spades" => Ok(Suit::Spades),
                "hearts" => Ok(Suit::Hearts),
                "diamonds" => Ok(Suit::Diamonds),
                "clubs" => Ok(Suit::Clubs),
                _ => Err(CardParseError::InvalidSuit(ch)),
            },
        }
    }
}

impl TryFrom<String> for CardFace {
    type Error = CardParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CardFace> for String {
    fn from(face: CardFace) -> Self {
        face.to_string()
    }
}

/// Попытка поменять масти у карт разного ранга.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Обмен мастями запрещён: карта #{left} ({left_rank}) и карта #{right} ({right_rank}) разного ранга")]
pub struct SuitSwapError {
    pub left: CardId,
    pub left_rank: Rank,
    pub right: CardId,
    pub right_rank: Rank,
}

/// Физическая карта шуза.
///
/// Ранг и исходная позиция (`origin`) не меняются никогда.
/// Масть меняется только обменом с картой того же ранга
/// (см. `Deck::swap_suits`), поэтому поля масти наружу не открыты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    rank: Rank,
    suit: Suit,
    /// Индекс карты в исходной перетасовке.
    origin: CardId,
    pub color: Option<CardColor>,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit, origin: CardId) -> Self {
        Self {
            rank,
            suit,
            origin,
            color: None,
        }
    }

    pub const fn rank(&self) -> Rank {
        self.rank
    }

    pub const fn suit(&self) -> Suit {
        self.suit
    }

    pub const fn origin(&self) -> CardId {
        self.origin
    }

    pub const fn face(&self) -> CardFace {
        CardFace::new(self.rank, self.suit)
    }

    pub const fn point(&self) -> u8 {
        self.rank.point()
    }

    pub(crate) fn set_origin(&mut self, origin: CardId) {
        self.origin = origin;
    }

    /// Обменяться мастями с другой картой того же ранга.
    pub(crate) fn swap_suit_with(&mut self, other: &mut Card) -> Result<(), SuitSwapError> {
        if self.rank != other.rank {
            return Err(SuitSwapError {
                left: self.origin,
                left_rank: self.rank,
                right: other.origin,
                right_rank: other.rank,
            });
        }
        std::mem::swap(&mut self.suit, &mut other.suit);
        Ok(())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.face().fmt(f)
    }
}
