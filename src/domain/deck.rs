use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::card::{Card, CardColor, CardFace, Rank, Suit, SuitSwapError};
use crate::domain::CardId;
use crate::engine::RandomSource;

/// Карт в одной стандартной колоде.
pub const CARDS_PER_DECK: usize = 52;

/// Шуз из нескольких колод в порядке одной перетасовки.
///
/// Это "арена" попытки: карта с `origin == i` лежит в `cards[i]`,
/// раунды и хвост ссылаются на карты только по `CardId`.
/// Перемешивание делает вызывающий код через `RandomSource`.
/// Только `Serialize`: собрать арену можно лишь конструкторами ниже,
/// иначе `origin` разойдётся с индексом.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// ♠ A..K, ♥ A..K, ♦ A..K, ♣ A..K.
    pub fn standard_52() -> Self {
        Self::multi(1)
    }

    /// `num_decks` колод подряд, без перемешивания.
    pub fn multi(num_decks: u8) -> Self {
        let mut faces = Vec::with_capacity(num_decks as usize * CARDS_PER_DECK);
        for _ in 0..num_decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    faces.push(CardFace::new(rank, suit));
                }
            }
        }
        Self::from_faces(&faces)
    }

    /// Свежая перетасовка: `num_decks` колод, каждая карта получает
    /// `origin` = свою позицию после shuffle.
    pub fn shuffled<R: RandomSource>(num_decks: u8, rng: &mut R) -> Self {
        let mut deck = Self::multi(num_decks);
        rng.shuffle(&mut deck.cards);
        deck.restamp_origins();
        deck
    }

    /// Явный порядок карт (тесты, ручные сценарии).
    pub fn from_faces(faces: &[CardFace]) -> Self {
        let cards = faces
            .iter()
            .enumerate()
            .map(|(i, f)| Card::new(f.rank, f.suit, i))
            .collect();
        Deck { cards }
    }

    fn restamp_origins(&mut self) {
        for (i, card) in self.cards.iter_mut().enumerate() {
            card.set_origin(i);
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> &Card {
        &self.cards[id]
    }

    /// Лица карт по списку хэндлов.
    pub fn faces_of(&self, ids: &[CardId]) -> Vec<CardFace> {
        ids.iter().map(|&id| self.cards[id].face()).collect()
    }

    /// Копии карт по списку хэндлов, в порядке списка (для симуляции).
    pub fn cards_of(&self, ids: &[CardId]) -> Vec<Card> {
        ids.iter().map(|&id| self.cards[id]).collect()
    }

    /// Атомарный обмен мастями двух карт одного ранга.
    ///
    /// Единственный способ изменить масть после перетасовки: количество
    /// каждой пары (ранг, масть) в шузе остаётся прежним.
    pub fn swap_suits(&mut self, a: CardId, b: CardId) -> Result<(), SuitSwapError> {
        if a == b {
            return Ok(());
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.cards.split_at_mut(hi);
        head[lo].swap_suit_with(&mut tail[0])
    }

    pub fn set_color(&mut self, id: CardId, color: CardColor) {
        self.cards[id].color = Some(color);
    }

    pub fn clear_colors(&mut self) {
        for card in &mut self.cards {
            card.color = None;
        }
    }

    /// Сколько раз встречается каждая пара (ранг, масть).
    pub fn face_counts(&self) -> BTreeMap<CardFace, usize> {
        let mut counts = BTreeMap::new();
        for card in &self.cards {
            *counts.entry(card.face()).or_insert(0) += 1;
        }
        counts
    }

    /// Сколько карт каждой масти по всему шузу.
    pub fn suit_counts(&self) -> BTreeMap<Suit, usize> {
        let mut counts = BTreeMap::new();
        for card in &self.cards {
            *counts.entry(card.suit()).or_insert(0) += 1;
        }
        counts
    }
}
