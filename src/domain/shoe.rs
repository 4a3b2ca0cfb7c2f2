use serde::Serialize;

use crate::domain::deck::Deck;
use crate::domain::round::{Outcome, Round, RoundView};
use crate::domain::CardId;

/// Итог одной успешной попытки: арена карт, раунды и хвост.
///
/// Инвариант: карты всех раундов, затем хвоста, покрывают каждую
/// позицию `Deck` ровно один раз.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Shoe {
    pub deck: Deck,
    /// Раунды, отсортированные по `start_index`.
    pub rounds: Vec<Round>,
    /// Хвост (0, 4, 5 или 6 карт) уже в чувствительном порядке.
    pub tail: Vec<CardId>,
    /// Исход хвоста как отдельного псевдо-раунда (`None`, если хвоста нет).
    pub tail_outcome: Option<Outcome>,
}

impl Shoe {
    pub fn total_cards(&self) -> usize {
        self.rounds.iter().map(Round::len).sum::<usize>() + self.tail.len()
    }

    pub fn sensitive_rounds(&self) -> usize {
        self.rounds.iter().filter(|r| r.sensitive).count()
    }

    /// Порядок выдачи карт: все раунды по очереди, затем хвост.
    pub fn dealing_order(&self) -> Vec<CardId> {
        let mut order = Vec::with_capacity(self.total_cards());
        for round in &self.rounds {
            order.extend_from_slice(&round.cards);
        }
        order.extend_from_slice(&self.tail);
        order
    }

    /// Раунды + хвост (если есть) как единый список для солвера.
    pub fn views(&self) -> Vec<RoundView<'_>> {
        build_views(&self.rounds, &self.tail, self.tail_outcome)
    }
}

pub(crate) fn build_views<'a>(
    rounds: &'a [Round],
    tail: &'a [CardId],
    tail_outcome: Option<Outcome>,
) -> Vec<RoundView<'a>> {
    let mut views: Vec<RoundView<'a>> = rounds
        .iter()
        .map(|r| RoundView {
            cards: &r.cards,
            outcome: r.outcome,
        })
        .collect();
    if let Some(outcome) = tail_outcome {
        if !tail.is_empty() {
            views.push(RoundView {
                cards: tail,
                outcome,
            });
        }
    }
    views
}
