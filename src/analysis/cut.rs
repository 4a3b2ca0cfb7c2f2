//! Анализатор подреза: сколько полных раундов успеет сыграться, если
//! шуз подрезан на позиции `cut`.

use serde::{Deserialize, Serialize};

use crate::domain::{Outcome, Shoe};

/// Одна позиция подреза.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CutRow {
    /// 1..=общее число карт.
    pub cut_position: usize,
    /// Раунды, целиком помещающиеся до подреза.
    pub playable_rounds: usize,
    /// Сколько из них чувствительные.
    pub sensitive_hits: usize,
    pub tail_outcome: Option<Outcome>,
    pub tail_len: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CutAnalysis {
    pub rows: Vec<CutRow>,
    /// Среднее `sensitive_hits` по всем строкам.
    pub avg_hits: f64,
    /// Среднее `playable_rounds` по всем строкам.
    pub avg_rounds: f64,
}

/// Построить таблицу подрезов для всех позиций 1..=total.
pub fn analyze_cuts(shoe: &Shoe) -> CutAnalysis {
    let total = shoe.total_cards();

    // Накопленная длина и число чувствительных на каждом префиксе раундов.
    let mut prefix: Vec<(usize, usize)> = Vec::with_capacity(shoe.rounds.len());
    let (mut used, mut hits) = (0usize, 0usize);
    for round in &shoe.rounds {
        used += round.len();
        hits += usize::from(round.sensitive);
        prefix.push((used, hits));
    }

    let mut rows = Vec::with_capacity(total);
    let mut k = 0;
    for cut in 1..=total {
        while k < prefix.len() && prefix[k].0 <= cut {
            k += 1;
        }
        rows.push(CutRow {
            cut_position: cut,
            playable_rounds: k,
            sensitive_hits: if k == 0 { 0 } else { prefix[k - 1].1 },
            tail_outcome: shoe.tail_outcome,
            tail_len: shoe.tail.len(),
        });
    }

    let (avg_hits, avg_rounds) = if rows.is_empty() {
        (0.0, 0.0)
    } else {
        let n = rows.len() as f64;
        (
            rows.iter().map(|r| r.sensitive_hits).sum::<usize>() as f64 / n,
            rows.iter().map(|r| r.playable_rounds).sum::<usize>() as f64 / n,
        )
    };

    CutAnalysis {
        rows,
        avg_hits,
        avg_rounds,
    }
}
