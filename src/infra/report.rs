//! CSV-отчёты по сгенерированным шузам.
//!
//! Четыре файла на запуск:
//!   - rounds   - строка на раунд (и хвост);
//!   - vertical - строка на карту в порядке раздачи;
//!   - cuts     - строка на позицию подреза;
//!   - averages - средние по подрезам, строка на шуз.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::api::dto::{RoundDto, ShoeDto};
use crate::domain::CardColor;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Ошибка ввода-вывода отчёта: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка записи CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct RoundRow<'a> {
    shoe: u32,
    round: &'a str,
    start: Option<usize>,
    count: usize,
    result: &'static str,
    sensitive: bool,
    faces: String,
    #[serde(rename = "♠")]
    spades: usize,
    #[serde(rename = "♥")]
    hearts: usize,
    #[serde(rename = "♦")]
    diamonds: usize,
    #[serde(rename = "♣")]
    clubs: usize,
    banker_points: u8,
    player_points: u8,
}

#[derive(Debug, Serialize)]
struct VerticalRow<'a> {
    shoe: u32,
    round: &'a str,
    seq: usize,
    face: &'a str,
    point: u8,
    suit: char,
    color: Option<char>,
    pos: usize,
}

#[derive(Debug, Serialize)]
struct CutCsvRow {
    shoe: u32,
    cut: usize,
    rounds: usize,
    hits: usize,
    tail_result: Option<&'static str>,
    tail_len: usize,
}

#[derive(Debug, Serialize)]
struct AverageRow {
    shoe: u32,
    avg_hits: f64,
    avg_rounds: f64,
}

/// Пути к файлам одного запуска.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportPaths {
    pub rounds: PathBuf,
    pub vertical: PathBuf,
    pub cuts: PathBuf,
    pub averages: PathBuf,
}

impl ReportPaths {
    pub fn in_dir(dir: &Path, stamp: &str) -> Self {
        Self {
            rounds: dir.join(format!("shoe_rounds_{stamp}.csv")),
            vertical: dir.join(format!("shoe_vertical_{stamp}.csv")),
            cuts: dir.join(format!("shoe_cuts_{stamp}.csv")),
            averages: dir.join(format!("shoe_cut_averages_{stamp}.csv")),
        }
    }
}

/// Писатель отчётов поверх четырёх `csv::Writer`.
pub struct ReportWriter<W: Write> {
    rounds: csv::Writer<W>,
    vertical: csv::Writer<W>,
    cuts: csv::Writer<W>,
    averages: csv::Writer<W>,
}

impl ReportWriter<BufWriter<File>> {
    /// Создать каталог и четыре файла отчёта.
    pub fn create(paths: &ReportPaths) -> Result<Self, ReportError> {
        for path in [&paths.rounds, &paths.vertical, &paths.cuts, &paths.averages] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
        }
        let open = |p: &Path| -> Result<BufWriter<File>, ReportError> { Ok(BufWriter::new(File::create(p)?)) };
        Ok(Self::from_writers(
            open(&paths.rounds)?,
            open(&paths.vertical)?,
            open(&paths.cuts)?,
            open(&paths.averages)?,
        ))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn from_writers(rounds: W, vertical: W, cuts: W, averages: W) -> Self {
        Self {
            rounds: csv::Writer::from_writer(rounds),
            vertical: csv::Writer::from_writer(vertical),
            cuts: csv::Writer::from_writer(cuts),
            averages: csv::Writer::from_writer(averages),
        }
    }

    /// Дописать в отчёты один шуз.
    pub fn write_shoe(&mut self, dto: &ShoeDto) -> Result<(), ReportError> {
        for round in dto.rounds.iter().chain(dto.tail.iter()) {
            self.write_round(dto.shoe, round)?;
        }
        for row in &dto.cuts {
            self.cuts.serialize(CutCsvRow {
                shoe: dto.shoe,
                cut: row.cut_position,
                rounds: row.playable_rounds,
                hits: row.sensitive_hits,
                tail_result: row.tail_outcome.map(|o| o.label()),
                tail_len: row.tail_len,
            })?;
        }
        self.averages.serialize(AverageRow {
            shoe: dto.shoe,
            avg_hits: dto.avg_hits,
            avg_rounds: dto.avg_rounds,
        })?;
        Ok(())
    }

    fn write_round(&mut self, shoe: u32, round: &RoundDto) -> Result<(), ReportError> {
        let [spades, hearts, diamonds, clubs] = round.suit_counts();
        self.rounds.serialize(RoundRow {
            shoe,
            round: &round.label,
            start: round.start_index,
            count: round.cards.len(),
            result: round.outcome.label(),
            sensitive: round.sensitive,
            faces: round.faces(),
            spades,
            hearts,
            diamonds,
            clubs,
            banker_points: round.banker_points,
            player_points: round.player_points,
        })?;

        for (seq, card) in round.cards.iter().enumerate() {
            self.vertical.serialize(VerticalRow {
                shoe,
                round: &round.label,
                seq: seq + 1,
                face: &card.face,
                point: card.point,
                suit: card.suit.symbol(),
                color: card.color.map(CardColor::code),
                pos: card.position,
            })?;
        }
        Ok(())
    }

    /// Сбросить буферы и вернуть нижележащие писатели
    /// (rounds, vertical, cuts, averages).
    pub fn finish(self) -> Result<(W, W, W, W), ReportError> {
        fn inner<W: Write>(w: csv::Writer<W>) -> Result<W, ReportError> {
            w.into_inner()
                .map_err(|e| ReportError::Io(std::io::Error::new(e.error().kind(), e.error().to_string())))
        }
        Ok((
            inner(self.rounds)?,
            inner(self.vertical)?,
            inner(self.cuts)?,
            inner(self.averages)?,
        ))
    }
}
