//! Хвост шуза: 4-6 оставшихся карт переставляются так, чтобы они
//! сами образовали чувствительный раунд.

use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::debug;

use crate::domain::{CardFace, CardId, Deck, Outcome};
use crate::engine::errors::StructuralFailure;
use crate::engine::packer::is_valid_tail_size;
use crate::engine::round::deal;
use crate::engine::sensitivity::is_sensitive_sequence;

/// Чувствителен ли хвост в порядке `order`.
pub fn is_sensitive_order(deck: &Deck, order: &[CardId]) -> bool {
    is_sensitive_sequence(&deck.cards_of(order))
}

/// Исход последовательности как одного раунда.
pub fn sequence_outcome(deck: &Deck, order: &[CardId]) -> Option<Outcome> {
    deal(&deck.cards_of(order)).map(|d| d.outcome)
}

/// Ручной порядок хвоста: принимается, только если мультимножество лиц
/// совпадает с хвостом и порядок действительно чувствителен.
pub fn try_manual_order(deck: &Deck, tail: &[CardId], manual: &[CardFace]) -> Option<Vec<CardId>> {
    if manual.len() != tail.len() {
        return None;
    }
    let mut wanted = manual.to_vec();
    let mut available = deck.faces_of(tail);
    wanted.sort();
    available.sort();
    if wanted != available {
        return None;
    }

    let mut stacks: BTreeMap<CardFace, Vec<CardId>> = BTreeMap::new();
    for &id in tail {
        stacks.entry(deck.card(id).face()).or_default().push(id);
    }
    let mut order = Vec::with_capacity(tail.len());
    for face in manual {
        order.push(stacks.get_mut(face)?.pop()?);
    }

    is_sensitive_order(deck, &order).then_some(order)
}

/// Быстрые кандидаты: как есть, задом наперёд, обмен 0-1, обмен 1-2.
fn heuristic_orders(tail: &[CardId]) -> Vec<Vec<CardId>> {
    let identity = tail.to_vec();
    let reversed: Vec<CardId> = tail.iter().rev().copied().collect();
    let mut swap_first = tail.to_vec();
    swap_first.swap(0, 1);
    let mut swap_second = tail.to_vec();
    swap_second.swap(1, 2);
    vec![identity, reversed, swap_first, swap_second]
}

/// Найти чувствительный порядок хвоста.
///
/// Порядок поиска: ручной порядок (если задан и подходит), эвристики,
/// затем полный перебор перестановок в лексикографическом порядке
/// индексов (не больше 720 для 6 карт).
pub fn resolve_tail(
    deck: &Deck,
    tail: &[CardId],
    manual: &[CardFace],
) -> Result<Vec<CardId>, StructuralFailure> {
    if tail.is_empty() {
        return Ok(Vec::new());
    }
    if !is_valid_tail_size(tail.len()) {
        return Err(StructuralFailure::InvalidTailSize(tail.len()));
    }

    if !manual.is_empty() {
        match try_manual_order(deck, tail, manual) {
            Some(order) => return Ok(order),
            None => debug!(len = tail.len(), "ручной хвост не подошёл, ищем автоматически"),
        }
    }

    if let Some(order) = heuristic_orders(tail)
        .into_iter()
        .find(|order| is_sensitive_order(deck, order))
    {
        return Ok(order);
    }

    tail.iter()
        .copied()
        .permutations(tail.len())
        .find(|order| is_sensitive_order(deck, order))
        .ok_or(StructuralFailure::TailNotSensitive(tail.len()))
}
