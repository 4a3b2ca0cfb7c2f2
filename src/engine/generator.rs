//! Цикл генерации шуза: атомарные попытки до первой успешной.
//!
//! Попытка ничего не оставляет после себя: перетасовка, раунды, хвост и
//! правки мастей живут только внутри `run_attempt`. Провал любой стадии
//! отбрасывает попытку целиком.

use tracing::{debug, info, warn};

use crate::analysis::integrity::verify_integrity;
use crate::domain::shoe::build_views;
use crate::domain::{Deck, Shoe};
use crate::engine::errors::{AttemptError, AttemptStats, GenerationError, StructuralFailure};
use crate::engine::packer::pack;
use crate::engine::tail::{resolve_tail, sequence_outcome};
use crate::engine::RandomSource;
use crate::infra::config::ShoeConfig;
use crate::solver::apply_shoe_rules;

/// Состояние цикла генерации.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationState {
    /// Идёт попытка с номером `attempt` (с единицы).
    Attempting { attempt: u32 },
    /// Шуз получен на попытке `attempts`.
    Done { shoe: Box<Shoe>, attempts: u32 },
}

/// Успешный результат генерации вместе со статистикой отбраковки.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedShoe {
    pub shoe: Shoe,
    /// Номер успешной попытки.
    pub attempts: u32,
    /// Отброшенные попытки по классам сбоев.
    pub stats: AttemptStats,
}

/// Одна попытка: перетасовка -> упаковка -> хвост -> солвер -> проверка.
pub fn run_attempt<R: RandomSource>(config: &ShoeConfig, rng: &mut R) -> Result<Shoe, AttemptError> {
    let mut deck = Deck::shuffled(config.num_decks, rng);
    let packed = pack(&deck, &config.packer_settings(), rng)?;

    let tail = resolve_tail(&deck, &packed.remainder, &config.manual_tail)?;
    let tail_outcome = if tail.is_empty() {
        None
    } else {
        let outcome = sequence_outcome(&deck, &tail).ok_or(StructuralFailure::DeckExhausted { start: tail[0] })?;
        Some(outcome)
    };

    let rounds = packed.rounds;
    {
        let views = build_views(&rounds, &tail, tail_outcome);
        apply_shoe_rules(&mut deck, &views, &config.solver_settings(), rng)?;
    }

    let shoe = Shoe {
        deck,
        rounds,
        tail,
        tail_outcome,
    };
    verify_integrity(&shoe, config.num_decks as usize)?;
    Ok(shoe)
}

/// Генерировать шуз, пока попытка не пройдёт или не кончится лимит.
pub fn generate_shoe<R: RandomSource>(
    config: &ShoeConfig,
    rng: &mut R,
) -> Result<GeneratedShoe, GenerationError> {
    config
        .validate()
        .map_err(|e| GenerationError::InvalidConfig(e.to_string()))?;

    let mut stats = AttemptStats::default();
    let mut last: Option<AttemptError> = None;
    let mut state = GenerationState::Attempting { attempt: 1 };

    loop {
        state = match state {
            GenerationState::Attempting { attempt } if attempt > config.max_attempts => {
                warn!(
                    attempts = config.max_attempts,
                    structural = stats.structural,
                    constraint = stats.constraint,
                    "лимит попыток исчерпан"
                );
                return Err(GenerationError::Exhausted {
                    attempts: config.max_attempts,
                    stats,
                    last,
                });
            }
            GenerationState::Attempting { attempt } => match run_attempt(config, rng) {
                Ok(shoe) => GenerationState::Done {
                    shoe: Box::new(shoe),
                    attempts: attempt,
                },
                Err(err) => {
                    debug!(attempt, %err, "попытка отброшена");
                    stats.record(&err);
                    last = Some(err);
                    GenerationState::Attempting { attempt: attempt + 1 }
                }
            },
            GenerationState::Done { shoe, attempts } => {
                info!(
                    attempts,
                    rounds = shoe.rounds.len(),
                    tail = shoe.tail.len(),
                    "шуз сгенерирован"
                );
                return Ok(GeneratedShoe {
                    shoe: *shoe,
                    attempts,
                    stats,
                });
            }
        };
    }
}
