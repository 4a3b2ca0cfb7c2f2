// tests/report_tests.rs
//
// DTO-маппинг и CSV-отчёты по сгенерированному шузу.

use shoe_engine::analysis::analyze_cuts;
use shoe_engine::api::ShoeDto;
use shoe_engine::engine::generate_shoe;
use shoe_engine::infra::{shoe_to_dto, ReportWriter, ShoeConfig, ShoeRng, TAIL_LABEL};

fn sample_dto() -> ShoeDto {
    let config = ShoeConfig {
        num_decks: 1,
        max_attempts: 10_000,
        ..ShoeConfig::default()
    };
    let generated = generate_shoe(&config, &mut ShoeRng::from_optional_seed(Some(5))).unwrap();
    let cuts = analyze_cuts(&generated.shoe);
    shoe_to_dto(3, &generated, &cuts)
}

fn lines(bytes: Vec<u8>) -> Vec<String> {
    String::from_utf8(bytes).unwrap().lines().map(str::to_owned).collect()
}

//
// TEST 1 — DTO mirrors the shoe
//
#[test]
fn dto_mapping() {
    let dto = sample_dto();

    assert_eq!(dto.shoe, 3);
    assert_eq!(dto.total_cards, 52);
    assert_eq!(dto.cuts.len(), 52);
    assert_eq!(dto.sensitive_rounds, dto.rounds.len());

    let cards: usize = dto.rounds.iter().map(|r| r.cards.len()).sum::<usize>()
        + dto.tail.as_ref().map_or(0, |t| t.cards.len());
    assert_eq!(cards, 52);

    for (i, round) in dto.rounds.iter().enumerate() {
        assert_eq!(round.label, (i + 1).to_string());
        assert!(round.start_index.is_some());
        assert!(round.cards.iter().all(|c| c.color.is_some()));
        assert_eq!(round.suit_counts().iter().sum::<usize>(), round.cards.len());
        let eight_or_nine = round.player_points >= 8 || round.banker_points >= 8;
        if round.natural {
            assert_eq!(round.cards.len(), 4);
            assert!(eight_or_nine);
        } else if round.cards.len() == 4 {
            assert!(!eight_or_nine);
        }
    }
    if let Some(tail) = &dto.tail {
        assert_eq!(tail.label, TAIL_LABEL);
        assert_eq!(tail.start_index, None);
    }

    let json = serde_json::to_string(&dto).unwrap();
    assert!(json.contains("\"avg_hits\""));
}

//
// TEST 2 — four CSV files with headers and one row per item
//
#[test]
fn csv_reports() {
    let dto = sample_dto();
    let mut writer = ReportWriter::from_writers(Vec::new(), Vec::new(), Vec::new(), Vec::new());
    writer.write_shoe(&dto).unwrap();
    let (rounds, vertical, cuts, averages) = writer.finish().unwrap();

    let rounds = lines(rounds);
    assert_eq!(
        rounds[0],
        "shoe,round,start,count,result,sensitive,faces,♠,♥,♦,♣,banker_points,player_points"
    );
    assert_eq!(rounds.len(), 1 + dto.rounds.len() + usize::from(dto.tail.is_some()));
    assert!(rounds[1].starts_with("3,1,"));

    let vertical = lines(vertical);
    assert_eq!(vertical[0], "shoe,round,seq,face,point,suit,color,pos");
    assert_eq!(vertical.len(), 1 + 52);

    let cuts = lines(cuts);
    assert_eq!(cuts[0], "shoe,cut,rounds,hits,tail_result,tail_len");
    assert_eq!(cuts.len(), 1 + 52);

    let averages = lines(averages);
    assert_eq!(averages[0], "shoe,avg_hits,avg_rounds");
    assert_eq!(averages.len(), 2);
}
