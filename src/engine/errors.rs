use thiserror::Error;

use crate::domain::{CardId, Rank, Suit, SuitSwapError};

/// Структурные сбои попытки: раздача, упаковка, хвост, целостность.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StructuralFailure {
    #[error("Колода закончилась посреди раунда с позиции {start}")]
    DeckExhausted { start: usize },

    #[error("После упаковки осталось {0} карт (допустимо 0, 4, 5 или 6)")]
    InvalidTailSize(usize),

    #[error("Ни одна перестановка хвоста из {0} карт не даёт чувствительный раунд")]
    TailNotSensitive(usize),

    #[error("Позиция {0} покрыта раундами не ровно один раз")]
    CoverageMismatch(CardId),

    #[error("Карта {rank}{suit} встречается {actual} раз вместо {expected}")]
    MultisetMismatch {
        rank: Rank,
        suit: Suit,
        actual: usize,
        expected: usize,
    },
}

/// Сбои солвера ограничений по мастям и цветам.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConstraintFailure {
    #[error(transparent)]
    SuitSwap(#[from] SuitSwapError),

    #[error("Масти {suit} ({required} карт) не хватает места в сигнальных раундах (ёмкость {capacity})")]
    SignalCapacity {
        suit: Suit,
        required: usize,
        capacity: usize,
    },

    #[error("Нет донора того же ранга для карты #{card} (нужна масть {suit})")]
    NoRankMatchedDonor { card: CardId, suit: Suit },

    #[error("Для сигнального раунда {round} нет пары донор/получатель одного ранга")]
    NoRankMatchedPair { round: usize },

    #[error("После распределения вне сигнальных раундов осталось {0} карт сигнальной масти")]
    SignalLeftover(usize),

    #[error("Раунд {round} нарушает правило масти ничьей {suit}")]
    TieSignalViolation { round: usize, suit: Suit },

    #[error("Баланс мастей не достигнут: разброс {spread} > допуска {tolerance}")]
    BalanceUnreachable { spread: usize, tolerance: usize },

    #[error("Раунду {round} не хватает цветовой квоты (красных {red_left}, чёрных {black_left})")]
    ColorQuota {
        round: usize,
        red_left: usize,
        black_left: usize,
    },

    #[error("Неокрашенных карт {uncolored}, а остаток квоты {budget}")]
    ColorBudgetMismatch { uncolored: usize, budget: usize },
}

/// Причина, по которой одна попытка отброшена.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("структурный сбой: {0}")]
    Structural(#[from] StructuralFailure),

    #[error("сбой ограничений: {0}")]
    Constraint(#[from] ConstraintFailure),
}

impl From<SuitSwapError> for AttemptError {
    fn from(err: SuitSwapError) -> Self {
        AttemptError::Constraint(ConstraintFailure::SuitSwap(err))
    }
}

/// Счётчики отброшенных попыток по классам сбоев.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttemptStats {
    pub structural: u32,
    pub constraint: u32,
}

impl AttemptStats {
    pub fn record(&mut self, err: &AttemptError) {
        match err {
            AttemptError::Structural(_) => self.structural += 1,
            AttemptError::Constraint(_) => self.constraint += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.structural + self.constraint
    }
}

/// Единственная ошибка, видимая за пределами ядра.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Не удалось сгенерировать шуз за {attempts} попыток")]
    Exhausted {
        attempts: u32,
        stats: AttemptStats,
        last: Option<AttemptError>,
    },

    #[error("Некорректная конфигурация: {0}")]
    InvalidConfig(String),
}
