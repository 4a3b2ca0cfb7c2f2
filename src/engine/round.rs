//! Движок одного раунда баккары: раздача 4 карт, правила третьей карты,
//! определение исхода.

use crate::domain::{Card, Outcome, Round};
use crate::engine::sensitivity;

/// Минимум карт для раунда (по две каждой стороне).
pub const MIN_ROUND_CARDS: usize = 4;
/// Максимум карт раунда (обе стороны взяли третью).
pub const MAX_ROUND_CARDS: usize = 6;

/// Итог раздачи без оценки чувствительности.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundDeal {
    /// Сколько карт съел раунд (4..=6).
    pub len: usize,
    pub outcome: Outcome,
    pub player_total: u8,
    pub banker_total: u8,
    pub player_cards: u8,
    pub banker_cards: u8,
}

impl RoundDeal {
    pub fn is_natural(&self) -> bool {
        self.len == MIN_ROUND_CARDS && (self.player_total >= 8 || self.banker_total >= 8)
    }
}

/// Берёт ли Player третью карту. Тянет на 0-5, стоит на 6-7.
pub fn player_draws(player_total: u8) -> bool {
    player_total <= 5
}

/// Берёт ли Banker третью карту.
/// Зависит от его суммы и очков третьей карты Player (если она была).
pub fn banker_draws(banker_total: u8, player_third: Option<u8>) -> bool {
    match (banker_total, player_third) {
        (0..=5, None) => true,
        (_, None) => false,
        (0..=2, Some(_)) => true,
        (3, Some(v)) => v != 8,
        (4, Some(v)) => (2..=7).contains(&v),
        (5, Some(v)) => (4..=7).contains(&v),
        (6, Some(v)) => v == 6 || v == 7,
        _ => false,
    }
}

/// Раздать раунд по очкам карт, начиная с `points[0]`.
///
/// Порядок: P1, B1, P2, B2, затем третьи карты.
/// `None`, если карт меньше 4 или не хватило карты на обязательный добор.
pub fn deal_points(points: &[u8]) -> Option<RoundDeal> {
    if points.len() < MIN_ROUND_CARDS {
        return None;
    }

    let mut player = (points[0] + points[2]) % 10;
    let mut banker = (points[1] + points[3]) % 10;
    let mut next = MIN_ROUND_CARDS;
    let mut player_cards = 2;
    let mut banker_cards = 2;

    let natural = player >= 8 || banker >= 8;
    if !natural {
        let mut player_third = None;
        if player_draws(player) {
            let third = *points.get(next)?;
            next += 1;
            player = (player + third) % 10;
            player_cards += 1;
            player_third = Some(third);
        }
        if banker_draws(banker, player_third) {
            let third = *points.get(next)?;
            next += 1;
            banker = (banker + third) % 10;
            banker_cards += 1;
        }
    }

    Some(RoundDeal {
        len: next,
        outcome: Outcome::from_totals(player, banker),
        player_total: player,
        banker_total: banker,
        player_cards,
        banker_cards,
    })
}

/// Очки первых (до шести) карт последовательности.
pub(crate) fn window_points(cards: &[Card]) -> ([u8; MAX_ROUND_CARDS], usize) {
    let mut points = [0u8; MAX_ROUND_CARDS];
    let n = cards.len().min(MAX_ROUND_CARDS);
    for (slot, card) in points.iter_mut().zip(cards) {
        *slot = card.point();
    }
    (points, n)
}

/// Раздать раунд с начала последовательности карт (режим `no_swap`).
pub fn deal(cards: &[Card]) -> Option<RoundDeal> {
    let (points, n) = window_points(cards);
    deal_points(&points[..n])
}

/// Раздать раунд с позиции `start`.
pub fn deal_at(cards: &[Card], start: usize) -> Option<RoundDeal> {
    deal(cards.get(start..)?)
}

/// Полная симуляция раунда с позиции `start`, включая проверку
/// чувствительности.
///
/// `start_index` раунда = исходная позиция его первой карты; при скане
/// исходной перетасовки это совпадает со `start`.
pub fn simulate_round(cards: &[Card], start: usize) -> Option<Round> {
    let deal = deal_at(cards, start)?;
    let rest = &cards[start..];
    let sensitive = sensitivity::is_sensitive(rest, &deal);

    Some(Round {
        start_index: rest[0].origin(),
        cards: rest[..deal.len].iter().map(Card::origin).collect(),
        outcome: deal.outcome,
        sensitive,
    })
}
