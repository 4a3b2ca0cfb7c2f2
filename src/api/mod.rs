//! Внешнее представление результата генерации.
//!
//! DTO (dto.rs) - плоские serde-структуры для JSON-экспорта и отчётов;
//! доменные типы наружу не отдаём.

pub mod dto;

pub use dto::*;
