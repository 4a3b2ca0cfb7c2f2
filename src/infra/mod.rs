//! Инфраструктурный слой вокруг движка шузов:
//! - конфигурация (JSON + значения по умолчанию);
//! - RNG-реализации для движка;
//! - маппинги domain -> API DTO;
//! - CSV-отчёты.

pub mod config;
pub mod mapping;
pub mod report;
pub mod rng;
pub mod rng_seed;

pub use config::{ConfigError, ShoeConfig};
pub use mapping::*;
pub use report::{ReportError, ReportPaths, ReportWriter};
pub use rng::*;
pub use rng_seed::RngSeed;
