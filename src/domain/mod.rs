//! Доменная модель шуза: карты, колоды-арены, раунды, итоговый шуз.

pub mod card;
pub mod deck;
pub mod round;
pub mod shoe;

/// Стабильный хэндл карты = её позиция в исходной перетасовке.
pub type CardId = usize;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use deck::*;
pub use round::*;
pub use shoe::Shoe;
