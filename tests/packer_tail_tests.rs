// tests/packer_tail_tests.rs
//
// Упаковщик и хвост.
//
// Проверяем:
//  1) естественный скан: жадно слева направо, без пересечений;
//  2) остаток недопустимого размера -> InvalidTailSize;
//  3) на случайной перетасовке раунды + остаток покрывают колоду ровно один раз;
//  4) хвост: эвристики, ручной порядок, полный перебор, отказ при отсутствии
//     чувствительного порядка.

use itertools::Itertools;

use shoe_engine::domain::{CardFace, Deck, Outcome};
use shoe_engine::engine::packer::{is_valid_tail_size, natural_scan, pack, PackerSettings};
use shoe_engine::engine::tail::{is_sensitive_order, resolve_tail, sequence_outcome};
use shoe_engine::engine::StructuralFailure;
use shoe_engine::infra::DeterministicRng;

fn faces(s: &str) -> Vec<CardFace> {
    s.split_whitespace().map(|f| f.parse().unwrap()).collect()
}

fn deck(s: &str) -> Deck {
    Deck::from_faces(&faces(s))
}

fn rng(seed: u8) -> DeterministicRng {
    DeterministicRng::from_seed([seed; 32])
}

//
// TEST 1 — valid tail sizes
//
#[test]
fn tail_sizes() {
    for ok in [0, 4, 5, 6] {
        assert!(is_valid_tail_size(ok));
    }
    for bad in [1, 2, 3, 7, 10] {
        assert!(!is_valid_tail_size(bad));
    }
}

//
// TEST 2 — natural scan + greedy claim
//
#[test]
fn pack_two_natural_rounds() {
    // Раунд с позиции 3 тоже чувствителен, но пересекается с первым.
    let d = deck("9♠ K♥ K♦ K♣ 9♦ K♠ Q♦ Q♣");
    let scanned = natural_scan(&d);
    assert!(scanned.iter().any(|r| r.start_index == 3));

    let packed = pack(&d, &PackerSettings::default(), &mut rng(1)).unwrap();
    assert_eq!(packed.rounds.len(), 2);
    assert_eq!(packed.rounds[0].cards, vec![0, 1, 2, 3]);
    assert_eq!(packed.rounds[1].cards, vec![4, 5, 6, 7]);
    assert!(packed.rounds.iter().all(|r| r.sensitive));
    assert!(packed.remainder.is_empty());
}

//
// TEST 3 — leftover of two cards is rejected
//
#[test]
fn pack_rejects_bad_remainder() {
    let d = deck("9♠ K♥ K♦ K♣ 5♠ 5♥");
    let err = pack(&d, &PackerSettings::default(), &mut rng(2)).unwrap_err();
    assert_eq!(err, StructuralFailure::InvalidTailSize(2));
}

//
// TEST 4 — coverage on real shuffles
//
#[test]
fn pack_covers_every_card_once() {
    let mut r = rng(3);
    let mut successes = 0;

    for _ in 0..50 {
        let d = Deck::shuffled(1, &mut r);
        let Ok(packed) = pack(&d, &PackerSettings::default(), &mut r) else {
            continue;
        };
        successes += 1;

        let mut seen = vec![0u32; d.len()];
        for round in &packed.rounds {
            assert!(round.sensitive);
            assert!((4..=6).contains(&round.len()));
            for &id in &round.cards {
                seen[id] += 1;
            }
        }
        for &id in &packed.remainder {
            seen[id] += 1;
        }
        assert!(seen.iter().all(|&n| n == 1), "every card exactly once");
        assert!(is_valid_tail_size(packed.remainder.len()));
        assert!(packed.rounds.windows(2).all(|w| w[0].start_index < w[1].start_index));
    }

    assert!(successes > 0, "at least one of 50 shuffles must pack");
}

//
// TEST 5 — heuristic: identity already sensitive
//
#[test]
fn tail_identity_order() {
    let d = deck("K♥ 9♠ K♦ K♣");
    let order = resolve_tail(&d, &[0, 1, 2, 3], &[]).unwrap();

    assert_eq!(order, vec![0, 1, 2, 3]);
    assert_eq!(sequence_outcome(&d, &order), Some(Outcome::Banker));
}

//
// TEST 6 — heuristic: reversed order
//
#[test]
fn tail_reversed_order() {
    // Как есть: 9 vs 0, обмен двух K ничего не меняет.
    let d = deck("K♦ K♣ 9♠ K♥");
    assert!(!is_sensitive_order(&d, &[0, 1, 2, 3]));

    let order = resolve_tail(&d, &[0, 1, 2, 3], &[]).unwrap();
    assert_eq!(order, vec![3, 2, 1, 0]);
}

//
// TEST 7 — manual order accepted
//
#[test]
fn tail_manual_order() {
    let d = deck("K♥ 9♠ K♦ K♣");
    let manual = faces("9♠ K♥ K♦ K♣");

    let order = resolve_tail(&d, &[0, 1, 2, 3], &manual).unwrap();
    assert_eq!(order, vec![1, 0, 2, 3]);
    assert_eq!(sequence_outcome(&d, &order), Some(Outcome::Player));
}

//
// TEST 8 — manual order with a foreign card falls back to search
//
#[test]
fn tail_manual_mismatch_falls_back() {
    let d = deck("K♥ 9♠ K♦ K♣");
    let manual = faces("9♠ K♥ K♦ Q♣");

    let order = resolve_tail(&d, &[0, 1, 2, 3], &manual).unwrap();
    assert_eq!(order, vec![0, 1, 2, 3]);
}

//
// TEST 9 — no sensitive permutation
//
#[test]
fn tail_without_sensitive_order() {
    let d = deck("K♠ K♥ K♦ K♣");
    assert_eq!(
        resolve_tail(&d, &[0, 1, 2, 3], &[]),
        Err(StructuralFailure::TailNotSensitive(4))
    );
}

//
// TEST 10 — empty and invalid tails
//
#[test]
fn tail_empty_and_invalid() {
    let d = deck("K♠ K♥ K♦");
    assert_eq!(resolve_tail(&d, &[], &[]), Ok(vec![]));
    assert_eq!(
        resolve_tail(&d, &[0, 1, 2], &[]),
        Err(StructuralFailure::InvalidTailSize(3))
    );
}

//
// TEST 11 — resolver succeeds exactly when some permutation is sensitive
//
#[test]
fn resolver_matches_brute_force() {
    let mut r = rng(11);
    let mut resolved = 0;

    for _ in 0..20 {
        let d = Deck::shuffled(1, &mut r);
        for len in [4usize, 5, 6] {
            for start in (0..d.len() - len).step_by(len) {
                let tail: Vec<usize> = (start..start + len).collect();
                let any_sensitive = tail
                    .iter()
                    .copied()
                    .permutations(len)
                    .any(|order| is_sensitive_order(&d, &order));

                let result = resolve_tail(&d, &tail, &[]);
                assert_eq!(result.is_ok(), any_sensitive, "tail {:?}", d.faces_of(&tail));

                if let Ok(order) = result {
                    resolved += 1;
                    assert!(is_sensitive_order(&d, &order));
                    let mut sorted = order.clone();
                    sorted.sort_unstable();
                    assert_eq!(sorted, tail);
                }
            }
        }
    }

    assert!(resolved > 0);
}

//
// TEST 12 — only the full search finds an order
//
#[test]
fn tail_found_by_full_search() {
    // Как есть, реверс, обмен 0-1 и обмен 1-2 не чувствительны.
    let d = deck("K♠ 9♦ K♥ A♣");
    let tail = [0, 1, 2, 3];
    for order in [[0, 1, 2, 3], [3, 2, 1, 0], [1, 0, 2, 3], [0, 2, 1, 3]] {
        assert!(!is_sensitive_order(&d, &order));
    }

    // 9 A K K: Player 9 против 1, после обмена 1 против 9.
    let order = resolve_tail(&d, &tail, &[]).unwrap();
    assert_eq!(order, vec![1, 3, 0, 2], "first sensitive order in lexicographic order");
    assert_eq!(sequence_outcome(&d, &order), Some(Outcome::Player));
}
