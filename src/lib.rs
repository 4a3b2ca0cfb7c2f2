//! Генератор "полностью чувствительных" шузов баккары.
//!
//! Шуз из нескольких колод разбивается на раунды так, чтобы у каждого
//! раунда обмен первых двух карт менял исход; остаток становится таким же
//! чувствительным хвостом. Поверх раскладки солвер расставляет масти и
//! цвета по сигнальным правилам, не меняя состав шуза.
//!
//! Слои:
//!   - `domain` - карты, колода-арена, раунды, шуз;
//!   - `engine` - раздача, чувствительность, упаковка, хвост, цикл попыток;
//!   - `solver` - правила мастей и цветов;
//!   - `analysis` - подрез и проверка целостности;
//!   - `infra` - конфигурация, RNG, маппинги, CSV-отчёты;
//!   - `api` - DTO для экспорта.

pub mod analysis;
pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod solver;
