//! Масть ничьей: раунд перед ничьей целиком из этой масти, остальные
//! раунды без неё.

use std::collections::BTreeSet;

use crate::domain::{Card, CardId, Deck, Outcome, RoundView, Suit};
use crate::engine::errors::ConstraintFailure;
use crate::engine::RandomSource;
use crate::solver::{count_suit, Locks};

/// Индексы раундов, за которыми следует ничья.
pub fn tie_signal_targets(views: &[RoundView<'_>]) -> BTreeSet<usize> {
    (0..views.len().saturating_sub(1))
        .filter(|&i| views[i + 1].outcome == Outcome::Tie)
        .collect()
}

/// Перекрасить целевые раунды в масть ничьей обменами с картами того же
/// ранга из других раундов. Возвращает замок на все карты целевых раундов.
pub fn enforce_tie_signal<R: RandomSource>(
    deck: &mut Deck,
    views: &[RoundView<'_>],
    tie_suit: Suit,
    rng: &mut R,
) -> Result<Locks, ConstraintFailure> {
    let targets = tie_signal_targets(views);

    // Все карты масти обязаны уместиться в целевые раунды.
    let capacity: usize = targets.iter().map(|&i| views[i].cards.len()).sum();
    let required: usize = views.iter().map(|v| count_suit(deck, v.cards, tie_suit)).sum();
    if required > capacity {
        return Err(ConstraintFailure::SignalCapacity {
            suit: tie_suit,
            required,
            capacity,
        });
    }

    let mut locks = Locks::new();
    for &idx in &targets {
        for &id in views[idx].cards {
            if deck.card(id).suit() == tie_suit {
                locks.insert(id);
                continue;
            }
            let rank = deck.card(id).rank();
            let donor = views
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != idx)
                .flat_map(|(_, v)| v.cards.iter().copied())
                .find(|&d| {
                    let c = deck.card(d);
                    c.rank() == rank && c.suit() == tie_suit && !locks.contains(&d)
                })
                .ok_or(ConstraintFailure::NoRankMatchedDonor {
                    card: id,
                    suit: tie_suit,
                })?;
            deck.swap_suits(id, donor)?;
            locks.insert(id);
        }
    }

    // Нецелевой раунд целиком из масти ничьей ломаем одним обменом.
    for (idx, view) in views.iter().enumerate() {
        if targets.contains(&idx) || view.cards.is_empty() {
            continue;
        }
        if count_suit(deck, view.cards, tie_suit) != view.cards.len() {
            continue;
        }
        let pick = view.cards[rng.index(view.cards.len())];
        let rank = deck.card(pick).rank();
        let partners: Vec<CardId> = deck
            .cards()
            .iter()
            .filter(|c| c.rank() == rank && c.suit() != tie_suit && !locks.contains(&c.origin()))
            .map(Card::origin)
            .collect();
        if !partners.is_empty() {
            let partner = partners[rng.index(partners.len())];
            deck.swap_suits(pick, partner)?;
        }
    }

    Ok(locks)
}

/// Целевые раунды на 100% из масти ничьей, в остальных её нет совсем.
pub fn validate_tie_signal(
    deck: &Deck,
    views: &[RoundView<'_>],
    tie_suit: Suit,
) -> Result<(), ConstraintFailure> {
    let targets = tie_signal_targets(views);
    for (idx, view) in views.iter().enumerate() {
        let count = count_suit(deck, view.cards, tie_suit);
        let ok = if targets.contains(&idx) {
            count == view.cards.len()
        } else {
            count == 0
        };
        if !ok {
            return Err(ConstraintFailure::TieSignalViolation {
                round: idx,
                suit: tie_suit,
            });
        }
    }
    Ok(())
}
