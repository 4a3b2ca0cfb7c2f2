use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::domain::{CardId, Deck, Rank, RoundView, Suit};
use crate::engine::errors::ConstraintFailure;
use crate::solver::Locks;

/// Предел шагов позднего баланса.
pub const LATE_BALANCE_MAX_STEPS: usize = 120;
/// Предел шагов баланса мастей без масти ничьей.
pub const NON_TIE_BALANCE_MAX_STEPS: usize = 160;

/// Количество карт каждой масти в раундах `views` (все четыре масти).
pub fn suit_counts(deck: &Deck, views: &[RoundView<'_>]) -> BTreeMap<Suit, usize> {
    let mut counts: BTreeMap<Suit, usize> = Suit::ALL.iter().map(|&s| (s, 0)).collect();
    for view in views {
        for &id in view.cards {
            *counts.entry(deck.card(id).suit()).or_insert(0) += 1;
        }
    }
    counts
}

/// max - min среди масти `suits`.
pub fn suit_spread(counts: &BTreeMap<Suit, usize>, suits: &[Suit]) -> usize {
    let values = suits.iter().map(|s| counts.get(s).copied().unwrap_or(0));
    match (values.clone().max(), values.min()) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    }
}

/// Самая частая и самая редкая масть (при равенстве - первая в порядке ♠ ♥ ♦ ♣).
fn extremes(counts: &BTreeMap<Suit, usize>, suits: &[Suit]) -> Option<(Suit, Suit)> {
    let count = |s: &Suit| counts.get(s).copied().unwrap_or(0);
    let hi = *suits.iter().min_by_key(|s| Reverse(count(s)))?;
    let lo = *suits.iter().min_by_key(|s| count(s))?;
    Some((hi, lo))
}

/// Один обмен: незалоченная карта масти `from` с незалоченной картой масти
/// `to` того же ранга. `false`, если такой пары нет.
fn swap_one(
    deck: &mut Deck,
    views: &[RoundView<'_>],
    locks: &Locks,
    from: Suit,
    to: Suit,
) -> Result<bool, ConstraintFailure> {
    let unlocked = |suit: Suit| -> Vec<CardId> {
        views
            .iter()
            .flat_map(|v| v.cards.iter().copied())
            .filter(|&id| deck.card(id).suit() == suit && !locks.contains(&id))
            .collect()
    };
    let high_cards = unlocked(from);
    let mut low_by_rank: BTreeMap<Rank, Vec<CardId>> = BTreeMap::new();
    for id in unlocked(to) {
        low_by_rank.entry(deck.card(id).rank()).or_default().push(id);
    }

    for high in high_cards {
        let rank = deck.card(high).rank();
        if let Some(low) = low_by_rank.get_mut(&rank).and_then(Vec::pop) {
            deck.swap_suits(high, low)?;
            return Ok(true);
        }
    }
    Ok(false)
}

/// Поздний баланс: пока разброс несигнальных мастей больше допуска,
/// обмениваем карту самой частой масти с картой самой редкой того же ранга.
///
/// Ошибка, если после остановки разброс всё ещё больше допуска.
pub fn late_balance(
    deck: &mut Deck,
    views: &[RoundView<'_>],
    locks: &Locks,
    tolerance: usize,
    excluded: &[Suit],
) -> Result<(), ConstraintFailure> {
    let suits: Vec<Suit> = Suit::ALL
        .into_iter()
        .filter(|s| !excluded.contains(s))
        .collect();
    if suits.len() < 2 {
        return Ok(());
    }

    for _ in 0..LATE_BALANCE_MAX_STEPS {
        let counts = suit_counts(deck, views);
        let Some((hi, lo)) = extremes(&counts, &suits) else {
            return Ok(());
        };
        if counts[&hi] - counts[&lo] <= tolerance {
            return Ok(());
        }
        if !swap_one(deck, views, locks, hi, lo)? {
            break;
        }
    }

    let spread = suit_spread(&suit_counts(deck, views), &suits);
    if spread <= tolerance {
        Ok(())
    } else {
        Err(ConstraintFailure::BalanceUnreachable { spread, tolerance })
    }
}

/// Подтягивает масти, кроме масти ничьей, к среднему значению.
/// Не проваливает попытку: останавливается, когда обменивать нечего.
pub fn balance_non_tie_suits(
    deck: &mut Deck,
    views: &[RoundView<'_>],
    tie_suit: Suit,
    locks: &Locks,
    tolerance: usize,
) -> Result<(), ConstraintFailure> {
    let suits: Vec<Suit> = Suit::ALL.into_iter().filter(|&s| s != tie_suit).collect();

    for _ in 0..NON_TIE_BALANCE_MAX_STEPS {
        let counts = suit_counts(deck, views);
        let total: usize = suits.iter().map(|s| counts[s]).sum();
        if total == 0 {
            return Ok(());
        }
        let mean = total as f64 / suits.len() as f64;
        let Some((hi, lo)) = extremes(&counts, &suits) else {
            return Ok(());
        };
        let above = counts[&hi] as f64 - mean;
        let below = mean - counts[&lo] as f64;
        if above <= tolerance as f64 && below <= tolerance as f64 {
            return Ok(());
        }
        if !swap_one(deck, views, locks, hi, lo)? {
            break;
        }
    }
    Ok(())
}
