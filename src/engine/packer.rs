//! Упаковщик шуза: жадное покрытие перетасовки чувствительными раундами.
//!
//! Фаза 1 - естественный скан исходного порядка.
//! Фаза 2 - многопроходное усиление: остаток перемешивается заново,
//! найденный раунд переносится на исходные карты.

use tracing::debug;

use crate::domain::{Card, CardId, Deck, Round};
use crate::engine::errors::StructuralFailure;
use crate::engine::round::{simulate_round, MAX_ROUND_CARDS, MIN_ROUND_CARDS};
use crate::engine::RandomSource;

/// Пороги остановки упаковки.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackerSettings {
    /// Усиление останавливается, когда свободных карт меньше этого числа;
    /// остаток уходит хвосту.
    pub min_tail_stop: usize,
    /// Минимум свободных карт, чтобы вообще пытаться усиливать.
    pub multi_pass_min_cards: usize,
}

impl Default for PackerSettings {
    fn default() -> Self {
        Self {
            min_tail_stop: 7,
            multi_pass_min_cards: 4,
        }
    }
}

/// Результат упаковки: раунды по `start_index` и свободный остаток.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedRounds {
    pub rounds: Vec<Round>,
    /// Кандидат в хвост, в исходном порядке.
    pub remainder: Vec<CardId>,
}

/// Допустимые размеры хвоста.
pub fn is_valid_tail_size(len: usize) -> bool {
    len == 0 || (MIN_ROUND_CARDS..=MAX_ROUND_CARDS).contains(&len)
}

/// Все чувствительные раунды исходного порядка (могут перекрываться).
pub fn natural_scan(deck: &Deck) -> Vec<Round> {
    let cards = deck.cards();
    (0..cards.len().saturating_sub(1))
        .filter_map(|start| simulate_round(cards, start))
        .filter(|round| round.sensitive)
        .collect()
}

/// Один проход усиления: перемешать пул и найти первый чувствительный
/// раунд. Нечувствительные раунды пропускаются целиком.
///
/// Карты раунда идут в порядке новой перетасовки, `start_index` =
/// исходная позиция его первой карты.
pub fn find_reinforcement_round<R: RandomSource>(pool: &[Card], rng: &mut R) -> Option<Round> {
    if pool.len() < MIN_ROUND_CARDS {
        return None;
    }
    let mut shuffled = pool.to_vec();
    rng.shuffle(&mut shuffled);

    let mut i = 0;
    while i + MIN_ROUND_CARDS <= shuffled.len() {
        match simulate_round(&shuffled, i) {
            None => i += 1,
            Some(round) if round.sensitive => return Some(round),
            Some(round) => i += round.len(),
        }
    }
    None
}

/// Упаковать перетасовку в непересекающиеся чувствительные раунды.
pub fn pack<R: RandomSource>(
    deck: &Deck,
    settings: &PackerSettings,
    rng: &mut R,
) -> Result<PackedRounds, StructuralFailure> {
    let mut claimed = vec![false; deck.len()];
    let mut rounds: Vec<Round> = Vec::new();

    for round in natural_scan(deck) {
        if round.cards.iter().any(|&id| claimed[id]) {
            continue;
        }
        for &id in &round.cards {
            claimed[id] = true;
        }
        rounds.push(round);
    }
    let natural = rounds.len();

    loop {
        let remaining: Vec<Card> = deck
            .cards()
            .iter()
            .filter(|c| !claimed[c.origin()])
            .copied()
            .collect();
        if remaining.len() < settings.multi_pass_min_cards || remaining.len() < settings.min_tail_stop {
            break;
        }
        let Some(round) = find_reinforcement_round(&remaining, rng) else {
            break;
        };
        for &id in &round.cards {
            claimed[id] = true;
        }
        rounds.push(round);
    }

    let remainder: Vec<CardId> = (0..deck.len()).filter(|&id| !claimed[id]).collect();
    debug!(
        natural,
        reinforced = rounds.len() - natural,
        remainder = remainder.len(),
        "упаковка завершена"
    );
    if !is_valid_tail_size(remainder.len()) {
        return Err(StructuralFailure::InvalidTailSize(remainder.len()));
    }

    rounds.sort_by_key(|r| r.start_index);
    Ok(PackedRounds { rounds, remainder })
}
