// tests/solver_tests.rs
//
// Солвер мастей и цветов на вручную собранных раундах.
//
// Проверяем:
//  1) масть ничьей: целевые раунды перекрашиваются, проверка проходит;
//  2) масть ничьей: нехватка ёмкости -> SignalCapacity;
//  3) сигнальная масть: строгое распределение и замки;
//  4) сигнальная масть: запасной вариант "хотя бы одна карта";
//  5) поздний баланс: обмены одного ранга не меняют итоговые количества;
//  6) цвета: квота 50/50 и шаблоны первых четырёх карт;
//  7) цвета: квоты не хватает -> ColorQuota;
//  8) ни одна стадия не меняет мультимножество карт.

use shoe_engine::domain::{CardColor, CardFace, CardId, Deck, Outcome, RoundView, Suit};
use shoe_engine::engine::ConstraintFailure;
use shoe_engine::infra::DeterministicRng;
use shoe_engine::solver::signal::{enforce_suit_distribution, signal_targets};
use shoe_engine::solver::{
    apply_color_rule, apply_shoe_rules, balance_non_tie_suits, distribute_signal_suit,
    enforce_tie_signal, late_balance, suit_counts, suit_spread, tie_signal_targets,
    validate_tie_signal, Locks, SolverSettings,
};

/// Раунды из строк; карты нумеруются подряд.
fn layout(rounds: &[&str]) -> (Deck, Vec<Vec<CardId>>) {
    let mut faces: Vec<CardFace> = Vec::new();
    let mut ids = Vec::new();
    for r in rounds {
        let start = faces.len();
        faces.extend(r.split_whitespace().map(|f| f.parse::<CardFace>().unwrap()));
        ids.push((start..faces.len()).collect());
    }
    (Deck::from_faces(&faces), ids)
}

fn views<'a>(ids: &'a [Vec<CardId>], outcomes: &[Outcome]) -> Vec<RoundView<'a>> {
    ids.iter()
        .zip(outcomes)
        .map(|(cards, &outcome)| RoundView { cards, outcome })
        .collect()
}

fn suit_in(deck: &Deck, cards: &[CardId], suit: Suit) -> usize {
    cards.iter().filter(|&&id| deck.card(id).suit() == suit).count()
}

fn rng() -> DeterministicRng {
    DeterministicRng::from_seed([7; 32])
}

use Outcome::{Banker as B, Player as P, Tie as T};

//
// TEST 1 — tie signal
//
#[test]
fn tie_signal_paints_round_before_tie() {
    let (mut deck, ids) = layout(&["2♠ 3♠ 4♠ 5♠", "2♣ 3♣ 4♣ 5♣", "6♥ 7♥ 8♥ 9♥"]);
    let before = deck.face_counts();
    let v = views(&ids, &[P, T, B]);

    assert_eq!(tie_signal_targets(&v).into_iter().collect::<Vec<_>>(), vec![0]);

    let locks = enforce_tie_signal(&mut deck, &v, Suit::Clubs, &mut rng()).unwrap();

    assert_eq!(suit_in(&deck, &ids[0], Suit::Clubs), 4);
    assert_eq!(suit_in(&deck, &ids[1], Suit::Clubs), 0);
    assert_eq!(locks.len(), 4);
    assert!(ids[0].iter().all(|id| locks.contains(id)));
    assert_eq!(validate_tie_signal(&deck, &v, Suit::Clubs), Ok(()));
    assert_eq!(deck.face_counts(), before);
}

//
// TEST 2 — tie signal without room
//
#[test]
fn tie_signal_capacity_failure() {
    let (mut deck, ids) = layout(&["2♠ 3♠ 4♠ 5♠", "2♣ 3♣ 4♣ 5♣", "6♣ 7♥ 8♥ 9♥"]);
    let v = views(&ids, &[P, T, B]);

    let err = enforce_tie_signal(&mut deck, &v, Suit::Clubs, &mut rng()).unwrap_err();
    assert_eq!(
        err,
        ConstraintFailure::SignalCapacity {
            suit: Suit::Clubs,
            required: 5,
            capacity: 4,
        }
    );
}

//
// TEST 3 — validation catches tie suit outside targets
//
#[test]
fn tie_signal_validation() {
    let (deck, ids) = layout(&["2♣ 3♣ 4♣ 5♣", "2♠ 3♣ 4♠ 5♠", "6♥ 7♥ 8♥ 9♥"]);
    let v = views(&ids, &[P, T, B]);

    assert_eq!(
        validate_tie_signal(&deck, &v, Suit::Clubs),
        Err(ConstraintFailure::TieSignalViolation { round: 1, suit: Suit::Clubs })
    );
}

//
// TEST 4 — strict signal distribution
//
#[test]
fn signal_suit_moves_into_rounds_before_banker() {
    let (mut deck, ids) = layout(&["2♠ 3♠ 4♠ 5♠", "2♥ 3♦ 4♦ 5♦", "6♠ 7♠ 8♠ 9♠", "6♥ 7♦ 8♦ 9♦"]);
    let before = deck.face_counts();
    let v = views(&ids, &[P, B, P, B]);

    assert_eq!(signal_targets(&v), vec![0, 2]);

    let locks = enforce_suit_distribution(&mut deck, &v, Suit::Hearts).unwrap();

    assert_eq!(suit_in(&deck, &ids[0], Suit::Hearts), 1);
    assert_eq!(suit_in(&deck, &ids[1], Suit::Hearts), 0);
    assert_eq!(suit_in(&deck, &ids[2], Suit::Hearts), 1);
    assert_eq!(suit_in(&deck, &ids[3], Suit::Hearts), 0);
    assert_eq!(locks, Locks::from([0, 8]));
    assert_eq!(deck.face_counts(), before);
}

//
// TEST 5 — fallback keeps one signal card per target
//
#[test]
fn signal_suit_fallback_when_capacity_is_short() {
    let (mut deck, ids) = layout(&[
        "2♠ 3♠ 4♠ 5♠",
        "2♥ 3♥ 4♥ 5♥",
        "6♠ 7♠ 8♠ 9♠",
        "6♥ 7♥ 8♥ 9♥",
        "10♥ J♥ Q♥ K♥",
    ]);
    let v = views(&ids, &[P, B, P, B, P]);

    assert!(matches!(
        enforce_suit_distribution(&mut deck.clone(), &v, Suit::Hearts),
        Err(ConstraintFailure::SignalCapacity { required: 12, capacity: 8, .. })
    ));

    distribute_signal_suit(&mut deck, &v, Suit::Hearts).unwrap();
    assert!(suit_in(&deck, &ids[0], Suit::Hearts) >= 1);
    assert!(suit_in(&deck, &ids[2], Suit::Hearts) >= 1);
}

//
// TEST 6 — late balance cannot move suit totals
//
#[test]
fn late_balance_keeps_totals() {
    let (mut deck, ids) = layout(&["A♠ 2♠ 3♠ 4♠", "A♥ 2♥ 3♦ 4♣"]);
    let v = views(&ids, &[P, B]);
    let counts = suit_counts(&deck, &v);
    assert_eq!(suit_spread(&counts, &Suit::ALL), 3);

    assert_eq!(late_balance(&mut deck, &v, &Locks::new(), 3, &[]), Ok(()));
    assert_eq!(
        late_balance(&mut deck, &v, &Locks::new(), 1, &[]),
        Err(ConstraintFailure::BalanceUnreachable { spread: 3, tolerance: 1 })
    );
    assert_eq!(suit_counts(&deck, &v), counts);

    // без пиков и хвоста разброс ♦/♣ = 0
    assert_eq!(late_balance(&mut deck, &v, &Locks::new(), 0, &[Suit::Spades, Suit::Hearts]), Ok(()));
    assert_eq!(balance_non_tie_suits(&mut deck, &v, Suit::Clubs, &Locks::new(), 0), Ok(()));
}

//
// TEST 7 — color quota and leading patterns
//
#[test]
fn color_rule_half_red_and_patterns() {
    let (mut deck, ids) = layout(&["2♠ 3♠ 4♠ 5♠", "6♠ 7♠ 8♠ 9♠ K♠", "A♥ 2♥ 3♥ 4♥ 5♥ 6♥"]);
    let v = views(&ids, &[P, B, T]);

    apply_color_rule(&mut deck, &v, &mut rng()).unwrap();

    let colors: Vec<CardColor> = (0..deck.len()).map(|id| deck.card(id).color.unwrap()).collect();
    let red = colors.iter().filter(|&&c| c == CardColor::Red).count();
    assert_eq!(red, 7);
    assert_eq!(colors.len() - red, 8);

    for round in &ids {
        let head: String = round[..4].iter().map(|&id| colors[id].code()).collect();
        assert!(head == "BBBR" || head == "RRRB", "unexpected head {head}");
    }
}

//
// TEST 8 — color quota exhausted
//
#[test]
fn color_rule_quota_failure() {
    let (mut deck, ids) = layout(&["2♠ 3♠"]);
    let v = views(&ids, &[P]);

    assert_eq!(
        apply_color_rule(&mut deck, &v, &mut rng()),
        Err(ConstraintFailure::ColorQuota { round: 0, red_left: 1, black_left: 1 })
    );
}

//
// TEST 9 — full pipeline keeps the multiset
//
#[test]
fn shoe_rules_keep_multiset() {
    let (mut deck, ids) = layout(&["2♠ 3♠ 4♠ 5♠", "2♥ 3♦ 4♦ 5♦", "6♠ 7♠ 8♠ 9♠", "6♥ 7♦ 8♦ 9♦"]);
    let before = deck.face_counts();
    let v = views(&ids, &[P, B, P, B]);
    let settings = SolverSettings {
        signal_suit: Some(Suit::Hearts),
        tie_signal_suit: None,
        balance_tolerance: 8,
        color_rule: true,
    };

    apply_shoe_rules(&mut deck, &v, &settings, &mut rng()).unwrap();

    assert_eq!(deck.face_counts(), before);
    assert!(deck.cards().iter().all(|c| c.color.is_some()));
}
