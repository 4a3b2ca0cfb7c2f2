//! Анализ готового шуза: позиции подреза и проверка целостности.

pub mod cut;
pub mod integrity;

pub use cut::{analyze_cuts, CutAnalysis, CutRow};
pub use integrity::verify_integrity;
