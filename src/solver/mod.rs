//! Солвер ограничений по мастям и цветам поверх готового шуза.
//!
//! Все изменения мастей идут только через `Deck::swap_suits`
//! (обмен у двух карт одного ранга), поэтому количество каждой пары
//! (ранг, масть) в шузе не меняется ни на одном шаге.
//!
//! Порядок стадий:
//!   1. масть ничьей (опционально)
//!   2. сигнальная масть (опционально)
//!   3. поздний баланс мастей
//!   4. баланс мастей без масти ничьей + проверка масти ничьей
//!   5. цвета (опционально, последним)

pub mod balance;
pub mod color;
pub mod signal;
pub mod tie_signal;

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{CardId, Deck, RoundView, Suit};
use crate::engine::errors::ConstraintFailure;
use crate::engine::RandomSource;

pub use balance::{balance_non_tie_suits, late_balance, suit_counts, suit_spread};
pub use color::apply_color_rule;
pub use signal::{distribute_signal_suit, signal_targets};
pub use tie_signal::{enforce_tie_signal, tie_signal_targets, validate_tie_signal};

/// Карты, которые последующие стадии не имеют права трогать.
pub type Locks = HashSet<CardId>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverSettings {
    pub signal_suit: Option<Suit>,
    pub tie_signal_suit: Option<Suit>,
    pub balance_tolerance: usize,
    pub color_rule: bool,
}

/// Сколько карт масти `suit` среди `cards`.
pub(crate) fn count_suit(deck: &Deck, cards: &[CardId], suit: Suit) -> usize {
    cards.iter().filter(|&&id| deck.card(id).suit() == suit).count()
}

/// Все карты масти `suit` в раундах `rounds` - в замок.
pub(crate) fn lock_suit_in(deck: &Deck, views: &[RoundView<'_>], rounds: &[usize], suit: Suit) -> Locks {
    rounds
        .iter()
        .flat_map(|&i| views[i].cards.iter().copied())
        .filter(|&id| deck.card(id).suit() == suit)
        .collect()
}

/// Прогнать все стадии солвера над раундами и хвостом одного шуза.
pub fn apply_shoe_rules<R: RandomSource>(
    deck: &mut Deck,
    views: &[RoundView<'_>],
    settings: &SolverSettings,
    rng: &mut R,
) -> Result<(), ConstraintFailure> {
    let mut locks = Locks::new();

    if let Some(tie_suit) = settings.tie_signal_suit {
        locks.extend(enforce_tie_signal(deck, views, tie_suit, rng)?);
    }

    if let Some(signal_suit) = settings.signal_suit {
        locks.extend(distribute_signal_suit(deck, views, signal_suit)?);
    }

    let excluded: Vec<Suit> = [settings.signal_suit, settings.tie_signal_suit]
        .into_iter()
        .flatten()
        .collect();
    late_balance(deck, views, &locks, settings.balance_tolerance, &excluded)?;

    if let Some(tie_suit) = settings.tie_signal_suit {
        balance_non_tie_suits(deck, views, tie_suit, &locks, settings.balance_tolerance)?;
        validate_tie_signal(deck, views, tie_suit)?;
    }

    if settings.color_rule {
        apply_color_rule(deck, views, rng)?;
    }

    debug!(locked = locks.len(), "ограничения применены");
    Ok(())
}
