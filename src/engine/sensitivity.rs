//! Оракул чувствительности: меняет местами первые две карты раунда
//! (P1 <-> B1), переигрывает раунд и сравнивает исходы.

use crate::domain::{Card, Outcome};
use crate::engine::round::{deal, deal_points, window_points, RoundDeal};

/// Раздача той же позиции, но с переставленными первыми двумя картами.
pub fn swapped_deal(cards: &[Card]) -> Option<RoundDeal> {
    let (mut points, n) = window_points(cards);
    if n < 2 {
        return None;
    }
    points.swap(0, 1);
    deal_points(&points[..n])
}

/// Засчитывается ли переход original -> swapped.
///
/// Условия: раунд после обмена существует, съедает столько же карт,
/// исход другой и не ничья. Переход Tie -> Banker не засчитывается.
pub fn is_sensitive_transition(original: &RoundDeal, swapped: Option<&RoundDeal>) -> bool {
    let Some(swapped) = swapped else {
        return false;
    };
    if swapped.len != original.len {
        return false;
    }
    if swapped.outcome == original.outcome || swapped.outcome == Outcome::Tie {
        return false;
    }
    !(original.outcome == Outcome::Tie && swapped.outcome == Outcome::Banker)
}

/// Чувствителен ли раунд `original`, розданный с начала `cards`.
pub fn is_sensitive(cards: &[Card], original: &RoundDeal) -> bool {
    is_sensitive_transition(original, swapped_deal(cards).as_ref())
}

/// Является ли последовательность ровно одним чувствительным раундом,
/// съедающим все её карты.
pub fn is_sensitive_sequence(cards: &[Card]) -> bool {
    match deal(cards) {
        Some(original) => original.len == cards.len() && is_sensitive(cards, &original),
        None => false,
    }
}
