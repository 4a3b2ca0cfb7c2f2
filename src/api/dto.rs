use serde::{Deserialize, Serialize};

use crate::domain::{CardColor, Outcome, Suit};

/// DTO одной карты в порядке раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardDto {
    /// Позиция карты в исходной перетасовке.
    pub position: usize,
    /// Лицо вида `3♣`.
    pub face: String,
    pub point: u8,
    pub suit: Suit,
    pub color: Option<CardColor>,
}

/// DTO раунда или хвоста.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundDto {
    /// Номер раунда с единицы или `tail`.
    pub label: String,
    /// Для хвоста - `None`.
    pub start_index: Option<usize>,
    pub outcome: Outcome,
    pub sensitive: bool,
    /// Натуральная 8/9 на первых четырёх картах.
    pub natural: bool,
    pub player_points: u8,
    pub banker_points: u8,
    pub cards: Vec<CardDto>,
}

impl RoundDto {
    /// Количество карт каждой масти в порядке ♠ ♥ ♦ ♣.
    pub fn suit_counts(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for (slot, suit) in counts.iter_mut().zip(Suit::ALL) {
            *slot = self.cards.iter().filter(|c| c.suit == suit).count();
        }
        counts
    }

    /// Лица карт через пробел.
    pub fn faces(&self) -> String {
        self.cards
            .iter()
            .map(|c| c.face.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// DTO строки анализа подреза.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CutRowDto {
    pub cut_position: usize,
    pub playable_rounds: usize,
    pub sensitive_hits: usize,
    pub tail_outcome: Option<Outcome>,
    pub tail_len: usize,
}

/// DTO целого шуза для экспорта в JSON и отчёты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShoeDto {
    /// Номер шуза в запуске (с единицы).
    pub shoe: u32,
    /// На какой попытке шуз получен.
    pub attempts: u32,
    pub total_cards: usize,
    pub sensitive_rounds: usize,
    pub rounds: Vec<RoundDto>,
    pub tail: Option<RoundDto>,
    pub cuts: Vec<CutRowDto>,
    pub avg_hits: f64,
    pub avg_rounds: f64,
}
