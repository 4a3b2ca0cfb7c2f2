//! Маппинг domain -> API DTO.

use crate::analysis::{CutAnalysis, CutRow};
use crate::api::dto::{CardDto, CutRowDto, RoundDto, ShoeDto};
use crate::domain::{Card, CardId, Deck, Outcome};
use crate::engine::generator::GeneratedShoe;
use crate::engine::round::deal;

/// Метка хвоста в отчётах.
pub const TAIL_LABEL: &str = "tail";

pub fn card_to_dto(card: &Card) -> CardDto {
    CardDto {
        position: card.origin(),
        face: card.face().to_string(),
        point: card.point(),
        suit: card.suit(),
        color: card.color,
    }
}

/// Раунд (или хвост) по списку хэндлов. Очки сторон пересчитываются
/// раздачей по текущим картам арены.
pub fn round_to_dto(
    deck: &Deck,
    label: String,
    start_index: Option<usize>,
    cards: &[CardId],
    outcome: Outcome,
    sensitive: bool,
) -> RoundDto {
    let dealt = deal(&deck.cards_of(cards));
    RoundDto {
        label,
        start_index,
        outcome,
        sensitive,
        natural: dealt.map_or(false, |d| d.is_natural()),
        player_points: dealt.map_or(0, |d| d.player_total),
        banker_points: dealt.map_or(0, |d| d.banker_total),
        cards: cards.iter().map(|&id| card_to_dto(deck.card(id))).collect(),
    }
}

pub fn cut_row_to_dto(row: &CutRow) -> CutRowDto {
    CutRowDto {
        cut_position: row.cut_position,
        playable_rounds: row.playable_rounds,
        sensitive_hits: row.sensitive_hits,
        tail_outcome: row.tail_outcome,
        tail_len: row.tail_len,
    }
}

/// Маппинг шуза вместе с анализом подреза -> ShoeDto.
pub fn shoe_to_dto(index: u32, generated: &GeneratedShoe, cuts: &CutAnalysis) -> ShoeDto {
    let shoe = &generated.shoe;
    let rounds = shoe
        .rounds
        .iter()
        .enumerate()
        .map(|(i, r)| {
            round_to_dto(
                &shoe.deck,
                (i + 1).to_string(),
                Some(r.start_index),
                &r.cards,
                r.outcome,
                r.sensitive,
            )
        })
        .collect();
    let tail = shoe.tail_outcome.map(|outcome| {
        round_to_dto(&shoe.deck, TAIL_LABEL.to_string(), None, &shoe.tail, outcome, true)
    });

    ShoeDto {
        shoe: index,
        attempts: generated.attempts,
        total_cards: shoe.total_cards(),
        sensitive_rounds: shoe.sensitive_rounds(),
        rounds,
        tail,
        cuts: cuts.rows.iter().map(cut_row_to_dto).collect(),
        avg_hits: cuts.avg_hits,
        avg_rounds: cuts.avg_rounds,
    }
}
