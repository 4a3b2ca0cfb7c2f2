// src/bin/shoe_cli.rs

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use shoe_engine::analysis::analyze_cuts;
use shoe_engine::api::ShoeDto;
use shoe_engine::domain::{CardFace, Suit};
use shoe_engine::engine::{generate_shoe, GenerationError};
use shoe_engine::infra::{shoe_to_dto, ReportPaths, ReportWriter, ShoeConfig, ShoeRng};

#[derive(Parser)]
#[command(name = "shoe-cli")]
#[command(about = "Генератор полностью чувствительных шузов баккары")]
struct Args {
    /// JSON-конфиг; флаги ниже перекрывают его значения
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Сколько шузов сгенерировать
    #[arg(short = 'n', long)]
    shoes: Option<u32>,

    /// Seed для воспроизводимых запусков
    #[arg(long)]
    seed: Option<u64>,

    /// Количество колод
    #[arg(long)]
    decks: Option<u8>,

    /// Лимит попыток на один шуз
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Сигнальная масть (♠ ♥ ♦ ♣, s h d c или имя)
    #[arg(long)]
    signal_suit: Option<Suit>,

    /// Выключить правило сигнальной масти
    #[arg(long)]
    no_signal: bool,

    /// Масть ничьей (по умолчанию правило выключено)
    #[arg(long)]
    tie_suit: Option<Suit>,

    /// Выключить правило цветов
    #[arg(long)]
    no_color: bool,

    /// Допуск баланса мастей
    #[arg(long)]
    tolerance: Option<usize>,

    /// Ручной хвост, например "3♣,8♦,4♠,3♠,K♦"
    #[arg(long, value_delimiter = ',')]
    manual_tail: Option<Vec<CardFace>>,

    /// Каталог для CSV-отчётов
    #[arg(long, default_value = "./shoe-results")]
    output_dir: PathBuf,

    /// Дополнительно записать все шузы одним JSON-документом
    #[arg(long)]
    json: bool,

    /// Подробный лог (debug)
    #[arg(short, long)]
    verbose: bool,

    /// Итоги и пути к файлам (info)
    #[arg(long)]
    show_output: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<ShoeConfig> {
        let mut config = match &self.config {
            Some(path) => ShoeConfig::from_json_file(path)
                .with_context(|| format!("конфиг {}", path.display()))?,
            None => ShoeConfig::default(),
        };

        if let Some(n) = self.shoes {
            config.num_shoes = n;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(decks) = self.decks {
            config.num_decks = decks;
        }
        if let Some(max) = self.max_attempts {
            config.max_attempts = max;
        }
        if let Some(suit) = self.signal_suit {
            config.signal_suit = suit;
        }
        if self.no_signal {
            config.signal_enabled = false;
        }
        if self.tie_suit.is_some() {
            config.tie_signal_suit = self.tie_suit;
        }
        if self.no_color {
            config.color_rule_enabled = false;
        }
        if let Some(tolerance) = self.tolerance {
            config.balance_tolerance = tolerance;
        }
        if let Some(tail) = &self.manual_tail {
            config.manual_tail = tail.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = args.resolve_config()?;
    info!(
        decks = config.num_decks,
        shoes = config.num_shoes,
        seed = ?config.seed,
        "старт генерации"
    );

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string();
    let paths = ReportPaths::in_dir(&args.output_dir, &stamp);
    let mut writer = ReportWriter::create(&paths).context("не удалось создать файлы отчёта")?;

    let mut rng = ShoeRng::from_optional_seed(config.seed);
    let mut exported: Vec<ShoeDto> = Vec::new();
    let mut skipped = 0u32;

    for index in 1..=config.num_shoes {
        match generate_shoe(&config, &mut rng) {
            Ok(generated) => {
                let cuts = analyze_cuts(&generated.shoe);
                let dto = shoe_to_dto(index, &generated, &cuts);
                writer.write_shoe(&dto)?;
                println!(
                    "Шуз #{index}: {} раундов, хвост {} карт, попытка {} (отброшено: структура {}, ограничения {}), среднее попаданий {:.2}",
                    generated.shoe.rounds.len(),
                    generated.shoe.tail.len(),
                    generated.attempts,
                    generated.stats.structural,
                    generated.stats.constraint,
                    cuts.avg_hits,
                );
                if args.json {
                    exported.push(dto);
                }
            }
            Err(GenerationError::Exhausted { attempts, stats, last }) => {
                skipped += 1;
                warn!(
                    shoe = index,
                    attempts,
                    structural = stats.structural,
                    constraint = stats.constraint,
                    last = ?last.map(|e| e.to_string()),
                    "шуз пропущен"
                );
            }
            Err(err @ GenerationError::InvalidConfig(_)) => return Err(err.into()),
        }
    }
    writer.finish()?;

    if args.json {
        let path = args.output_dir.join(format!("shoes_{stamp}.json"));
        let body = serde_json::to_string_pretty(&exported)?;
        std::fs::write(&path, body).with_context(|| format!("запись {}", path.display()))?;
        info!(path = %path.display(), "JSON записан");
    }

    info!(
        rounds = %paths.rounds.display(),
        vertical = %paths.vertical.display(),
        cuts = %paths.cuts.display(),
        averages = %paths.averages.display(),
        "отчёты записаны"
    );
    println!(
        "Готово: {} из {} шузов, отчёты в {}",
        config.num_shoes - skipped,
        config.num_shoes,
        args.output_dir.display()
    );
    Ok(())
}
