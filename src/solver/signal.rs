//! Сигнальная масть: все её карты собираются в раунды, за которыми
//! следует победа Banker (множество S).

use std::cmp::Reverse;

use tracing::debug;

use crate::domain::{CardId, Deck, Outcome, RoundView, Suit};
use crate::engine::errors::ConstraintFailure;
use crate::solver::{count_suit, lock_suit_in, Locks};

/// S: индексы i, для которых раунд i + 1 выиграл Banker.
pub fn signal_targets(views: &[RoundView<'_>]) -> Vec<usize> {
    (0..views.len().saturating_sub(1))
        .filter(|&i| views[i + 1].outcome == Outcome::Banker)
        .collect()
}

/// Первая пара (получатель, донор) одного ранга: позиции в списках.
fn find_rank_pair(deck: &Deck, receivers: &[CardId], donors: &[CardId]) -> Option<(usize, usize)> {
    receivers.iter().enumerate().find_map(|(ri, &r)| {
        let rank = deck.card(r).rank();
        donors
            .iter()
            .position(|&d| deck.card(d).rank() == rank)
            .map(|di| (ri, di))
    })
}

/// Квоты сигнальной масти для раундов S.
///
/// Стартуем с текущего количества, затем по кругу раздаём карты,
/// лежащие вне S, начиная с раундов с наибольшим свободным местом.
fn signal_quotas(deck: &Deck, views: &[RoundView<'_>], targets: &[usize], suit: Suit, outside: usize) -> Vec<usize> {
    let mut quota = vec![0usize; views.len()];
    for &i in targets {
        quota[i] = count_suit(deck, views[i].cards, suit);
    }

    let mut by_room = targets.to_vec();
    by_room.sort_by_key(|&i| Reverse(views[i].cards.len() - quota[i]));

    let mut remain = outside;
    let mut ptr = 0;
    while remain > 0 {
        let i = by_room[ptr];
        if quota[i] < views[i].cards.len() {
            quota[i] += 1;
            remain -= 1;
        }
        ptr = (ptr + 1) % by_room.len();
    }
    quota
}

/// Строгое распределение: после него вне S нет ни одной карты масти.
pub fn enforce_suit_distribution(
    deck: &mut Deck,
    views: &[RoundView<'_>],
    suit: Suit,
) -> Result<Locks, ConstraintFailure> {
    let targets = signal_targets(views);
    let mut in_targets = vec![false; views.len()];
    for &i in &targets {
        in_targets[i] = true;
    }

    let required: usize = views.iter().map(|v| count_suit(deck, v.cards, suit)).sum();
    let capacity: usize = targets.iter().map(|&i| views[i].cards.len()).sum();
    if capacity < required {
        return Err(ConstraintFailure::SignalCapacity {
            suit,
            required,
            capacity,
        });
    }

    let mut donors: Vec<CardId> = views
        .iter()
        .enumerate()
        .filter(|&(i, _)| !in_targets[i])
        .flat_map(|(_, v)| v.cards.iter().copied())
        .filter(|&id| deck.card(id).suit() == suit)
        .collect();

    let quota = signal_quotas(deck, views, &targets, suit, donors.len());

    for &i in &targets {
        let need = quota[i].saturating_sub(count_suit(deck, views[i].cards, suit));
        let mut receivers: Vec<CardId> = views[i]
            .cards
            .iter()
            .copied()
            .filter(|&id| deck.card(id).suit() != suit)
            .collect();
        for _ in 0..need {
            let (ri, di) = find_rank_pair(deck, &receivers, &donors)
                .ok_or(ConstraintFailure::NoRankMatchedPair { round: i })?;
            let receiver = receivers.remove(ri);
            let donor = donors.remove(di);
            deck.swap_suits(receiver, donor)?;
        }
    }

    if !donors.is_empty() {
        return Err(ConstraintFailure::SignalLeftover(donors.len()));
    }
    Ok(lock_suit_in(deck, views, &targets, suit))
}

/// Ослабленная гарантия: в каждом раунде S есть хотя бы одна карта масти.
pub fn ensure_signal_presence(
    deck: &mut Deck,
    views: &[RoundView<'_>],
    suit: Suit,
) -> Result<Locks, ConstraintFailure> {
    let targets = signal_targets(views);
    let mut donors: Vec<CardId> = views
        .iter()
        .enumerate()
        .filter(|(i, _)| !targets.contains(i))
        .flat_map(|(_, v)| v.cards.iter().copied())
        .filter(|&id| deck.card(id).suit() == suit)
        .collect();

    for &i in &targets {
        if count_suit(deck, views[i].cards, suit) > 0 {
            continue;
        }
        let receivers: Vec<CardId> = views[i].cards.to_vec();
        let (ri, di) = find_rank_pair(deck, &receivers, &donors)
            .ok_or(ConstraintFailure::NoRankMatchedPair { round: i })?;
        let donor = donors.remove(di);
        deck.swap_suits(receivers[ri], donor)?;
    }

    Ok(lock_suit_in(deck, views, &targets, suit))
}

/// Строгое распределение, при неудаче - ослабленная гарантия.
pub fn distribute_signal_suit(
    deck: &mut Deck,
    views: &[RoundView<'_>],
    suit: Suit,
) -> Result<Locks, ConstraintFailure> {
    match enforce_suit_distribution(deck, views, suit) {
        Ok(locks) => Ok(locks),
        Err(err) => {
            debug!(%err, "строгое распределение сигнальной масти не удалось, запасной вариант");
            ensure_signal_presence(deck, views, suit)
        }
    }
}
