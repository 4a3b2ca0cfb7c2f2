//! Правило цветов: первые четыре карты каждого раунда (и хвоста) - либо
//! Ч Ч Ч К, либо К К К Ч; всего в шузе ровно половина красных.

use crate::domain::{CardColor, CardId, Deck, RoundView};
use crate::engine::errors::ConstraintFailure;
use crate::engine::RandomSource;

use CardColor::{Black, Red};

const PATTERN_LEN: usize = 4;
const BLACK_LEADING: [CardColor; PATTERN_LEN] = [Black, Black, Black, Red];
const RED_LEADING: [CardColor; PATTERN_LEN] = [Red, Red, Red, Black];

/// Оставшаяся квота цветов.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ColorBudget {
    red: usize,
    black: usize,
}

impl ColorBudget {
    fn for_cards(total: usize) -> Self {
        let red = total / 2;
        Self {
            red,
            black: total - red,
        }
    }

    fn needs(pattern: &[CardColor]) -> (usize, usize) {
        let red = pattern.iter().filter(|&&c| c == Red).count();
        (red, pattern.len() - red)
    }

    fn affords(&self, pattern: &[CardColor]) -> bool {
        let (red, black) = Self::needs(pattern);
        self.red >= red && self.black >= black
    }

    fn spend(&mut self, pattern: &[CardColor]) {
        let (red, black) = Self::needs(pattern);
        self.red -= red;
        self.black -= black;
    }

    fn remaining(&self) -> usize {
        self.red + self.black
    }
}

/// Назначить цвета всем картам раундов и хвоста.
///
/// Масти и ранги не трогаются. Прежние цвета стираются.
pub fn apply_color_rule<R: RandomSource>(
    deck: &mut Deck,
    views: &[RoundView<'_>],
    rng: &mut R,
) -> Result<(), ConstraintFailure> {
    deck.clear_colors();
    let all: Vec<CardId> = views.iter().flat_map(|v| v.cards.iter().copied()).collect();
    let mut budget = ColorBudget::for_cards(all.len());

    for (idx, view) in views.iter().enumerate() {
        let k = view.cards.len().min(PATTERN_LEN);
        if k == 0 {
            continue;
        }
        let black_ok = budget.affords(&BLACK_LEADING[..k]);
        let red_ok = budget.affords(&RED_LEADING[..k]);
        let pattern = match (black_ok, red_ok) {
            (true, true) => {
                if rng.coin() {
                    &BLACK_LEADING
                } else {
                    &RED_LEADING
                }
            }
            (true, false) => &BLACK_LEADING,
            (false, true) => &RED_LEADING,
            (false, false) => {
                return Err(ConstraintFailure::ColorQuota {
                    round: idx,
                    red_left: budget.red,
                    black_left: budget.black,
                })
            }
        };
        budget.spend(&pattern[..k]);
        for (&id, &color) in view.cards.iter().zip(pattern.iter()) {
            deck.set_color(id, color);
        }
    }

    let uncolored: Vec<CardId> = all
        .iter()
        .copied()
        .filter(|&id| deck.card(id).color.is_none())
        .collect();
    if uncolored.len() != budget.remaining() {
        return Err(ConstraintFailure::ColorBudgetMismatch {
            uncolored: uncolored.len(),
            budget: budget.remaining(),
        });
    }

    let mut pool: Vec<CardColor> = std::iter::repeat(Red)
        .take(budget.red)
        .chain(std::iter::repeat(Black).take(budget.black))
        .collect();
    rng.shuffle(&mut pool);
    for (id, color) in uncolored.into_iter().zip(pool) {
        deck.set_color(id, color);
    }
    Ok(())
}
