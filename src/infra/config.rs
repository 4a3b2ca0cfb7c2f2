//! Конфигурация генератора шузов.
//!
//! Значение передаётся в генератор явно; глобального состояния нет.
//! Источник - JSON-файл (все поля необязательны) плюс флаги CLI поверх.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CardFace, Suit};
use crate::engine::packer::{is_valid_tail_size, PackerSettings};
use crate::solver::SolverSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось прочитать конфиг: {0}")]
    Io(#[from] std::io::Error),

    #[error("Некорректный JSON конфига: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Недопустимое значение: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShoeConfig {
    /// Сколько стандартных колод в шузе.
    pub num_decks: u8,
    /// Усиление останавливается, когда свободных карт меньше.
    pub min_tail_stop: usize,
    /// Минимум свободных карт для прохода усиления.
    pub multi_pass_min_cards: usize,
    /// Сколько попыток даётся на один шуз.
    pub max_attempts: u32,
    pub signal_enabled: bool,
    /// Масть, которая должна стоять перед раундами с победой Banker.
    pub signal_suit: Suit,
    /// Масть раундов перед ничьей (`None` = правило выключено).
    pub tie_signal_suit: Option<Suit>,
    /// Допустимый разброс количества карт между несигнальными мастями.
    pub balance_tolerance: usize,
    pub color_rule_enabled: bool,
    /// Ручной порядок хвоста, например `["3♣", "8♦", "4♠", "3♠", "K♦"]`.
    pub manual_tail: Vec<CardFace>,
    pub seed: Option<u64>,
    /// Сколько шузов сгенерировать за запуск.
    pub num_shoes: u32,
}

impl Default for ShoeConfig {
    fn default() -> Self {
        Self {
            num_decks: 8,
            min_tail_stop: 7,
            multi_pass_min_cards: 4,
            max_attempts: 1_000_000,
            signal_enabled: true,
            signal_suit: Suit::Hearts,
            tie_signal_suit: None,
            balance_tolerance: 2,
            color_rule_enabled: true,
            manual_tail: Vec::new(),
            seed: None,
            num_shoes: 1,
        }
    }
}

impl ShoeConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: ShoeConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_decks == 0 {
            return Err(ConfigError::Invalid("num_decks должно быть > 0".into()));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts должно быть > 0".into()));
        }
        if self.num_shoes == 0 {
            return Err(ConfigError::Invalid("num_shoes должно быть > 0".into()));
        }
        if !is_valid_tail_size(self.manual_tail.len()) {
            return Err(ConfigError::Invalid(format!(
                "manual_tail: {} карт, допустимо 0, 4, 5 или 6",
                self.manual_tail.len()
            )));
        }
        if let (Some(signal), Some(tie)) = (self.active_signal_suit(), self.tie_signal_suit) {
            if signal == tie {
                return Err(ConfigError::Invalid(format!(
                    "signal_suit и tie_signal_suit совпадают ({signal})"
                )));
            }
        }
        Ok(())
    }

    /// Сигнальная масть, если правило включено.
    pub fn active_signal_suit(&self) -> Option<Suit> {
        self.signal_enabled.then_some(self.signal_suit)
    }

    pub fn packer_settings(&self) -> PackerSettings {
        PackerSettings {
            min_tail_stop: self.min_tail_stop,
            multi_pass_min_cards: self.multi_pass_min_cards,
        }
    }

    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            signal_suit: self.active_signal_suit(),
            tie_signal_suit: self.tie_signal_suit,
            balance_tolerance: self.balance_tolerance,
            color_rule: self.color_rule_enabled,
        }
    }
}
