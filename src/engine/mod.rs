//! Движок построения шуза: раздача, чувствительность, упаковка, хвост,
//! повтор попыток.
//!
//! Высокоуровневый вход: `generate_shoe`
//! Основные операции:
//!   - `simulate_round` – раздать раунд с позиции и оценить чувствительность
//!   - `pack` – жадно покрыть перетасовку чувствительными раундами
//!   - `resolve_tail` – переставить остаток в чувствительный хвост
//!   - `run_attempt` – одна атомарная попытка целиком

pub mod errors;
pub mod generator;
pub mod packer;
pub mod round;
pub mod sensitivity;
pub mod tail;

pub use errors::{AttemptError, AttemptStats, ConstraintFailure, GenerationError, StructuralFailure};
pub use generator::{generate_shoe, run_attempt, GeneratedShoe, GenerationState};
pub use packer::{pack, PackedRounds, PackerSettings};
pub use round::{deal, deal_at, simulate_round, RoundDeal};
pub use sensitivity::{is_sensitive_sequence, swapped_deal};
pub use tail::resolve_tail;

/// RNG интерфейс для движка.
/// Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерный индекс в `0..upper`, `upper > 0`.
    fn index(&mut self, upper: usize) -> usize;

    /// Честная монетка.
    fn coin(&mut self) -> bool {
        self.index(2) == 0
    }
}
