// tests/config_tests.rs
//
// Конфигурация: значения по умолчанию, JSON, валидация.

use shoe_engine::domain::{CardFace, Suit};
use shoe_engine::infra::{ConfigError, ShoeConfig};

//
// TEST 1 — defaults
//
#[test]
fn defaults() {
    let c = ShoeConfig::default();

    assert_eq!(c.num_decks, 8);
    assert_eq!(c.min_tail_stop, 7);
    assert_eq!(c.multi_pass_min_cards, 4);
    assert_eq!(c.max_attempts, 1_000_000);
    assert_eq!(c.active_signal_suit(), Some(Suit::Hearts));
    assert_eq!(c.tie_signal_suit, None);
    assert_eq!(c.balance_tolerance, 2);
    assert!(c.color_rule_enabled);
    assert!(c.manual_tail.is_empty());
    assert_eq!(c.num_shoes, 1);
    assert!(c.validate().is_ok());
}

//
// TEST 2 — partial JSON keeps defaults for missing fields
//
#[test]
fn partial_json() {
    let c = ShoeConfig::from_json_str(
        r#"{
            "num_decks": 2,
            "signal_suit": "♠",
            "tie_signal_suit": "Clubs",
            "manual_tail": ["3♣", "8♦", "4♠", "3♠", "K♦"],
            "seed": 42
        }"#,
    )
    .unwrap();

    assert_eq!(c.num_decks, 2);
    assert_eq!(c.signal_suit, Suit::Spades);
    assert_eq!(c.tie_signal_suit, Some(Suit::Clubs));
    assert_eq!(c.manual_tail.len(), 5);
    assert_eq!(c.manual_tail[0], "3♣".parse::<CardFace>().unwrap());
    assert_eq!(c.seed, Some(42));
    assert_eq!(c.max_attempts, 1_000_000);

    let packer = c.packer_settings();
    assert_eq!((packer.min_tail_stop, packer.multi_pass_min_cards), (7, 4));
    let solver = c.solver_settings();
    assert_eq!(solver.signal_suit, Some(Suit::Spades));
    assert_eq!(solver.tie_signal_suit, Some(Suit::Clubs));
}

//
// TEST 3 — validation
//
#[test]
fn validation_errors() {
    for json in [
        r#"{"num_decks": 0}"#,
        r#"{"max_attempts": 0}"#,
        r#"{"num_shoes": 0}"#,
        r#"{"manual_tail": ["3♣", "8♦", "4♠"]}"#,
        r#"{"signal_suit": "♣", "tie_signal_suit": "♣"}"#,
    ] {
        assert!(
            matches!(ShoeConfig::from_json_str(json), Err(ConfigError::Invalid(_))),
            "{json} must be rejected"
        );
    }

    // одинаковые масти допустимы, если сигнал выключен
    let c = ShoeConfig::from_json_str(r#"{"signal_enabled": false, "signal_suit": "♣", "tie_signal_suit": "♣"}"#);
    assert!(c.is_ok());
    assert_eq!(c.unwrap().solver_settings().signal_suit, None);
}

//
// TEST 4 — malformed JSON
//
#[test]
fn malformed_json() {
    assert!(matches!(ShoeConfig::from_json_str("{ nope"), Err(ConfigError::Json(_))));
    assert!(matches!(
        ShoeConfig::from_json_str(r#"{"manual_tail": ["Zz"]}"#),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        ShoeConfig::from_json_file("/definitely/missing/config.json"),
        Err(ConfigError::Io(_))
    ));
}
