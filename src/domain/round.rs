use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::CardId;

/// Исход раунда баккары.
///
/// Player = первая сторона (карты 0 и 2), Banker = вторая (карты 1 и 3).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Outcome {
    Player,
    Banker,
    Tie,
}

impl Outcome {
    pub fn from_totals(player: u8, banker: u8) -> Self {
        match player.cmp(&banker) {
            std::cmp::Ordering::Equal => Outcome::Tie,
            std::cmp::Ordering::Greater => Outcome::Player,
            std::cmp::Ordering::Less => Outcome::Banker,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Outcome::Player => "P",
            Outcome::Banker => "B",
            Outcome::Tie => "T",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Раунд, упакованный в шуз.
///
/// Карты хранятся хэндлами в арене `Deck`, в порядке раздачи.
/// Флаг `sensitive` фиксируется при создании и больше не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Round {
    pub start_index: usize,
    pub cards: Vec<CardId>,
    pub outcome: Outcome,
    pub sensitive: bool,
}

impl Round {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Единый взгляд на раунд или хвост для солвера ограничений.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundView<'a> {
    pub cards: &'a [CardId],
    pub outcome: Outcome,
}
