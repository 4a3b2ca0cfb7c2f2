use crate::domain::{CardFace, Rank, Shoe, Suit};
use crate::engine::errors::StructuralFailure;

/// Итоговая проверка попытки.
///
/// Каждая позиция арены покрыта раундами и хвостом ровно один раз,
/// а каждая пара (ранг, масть) встречается ровно `num_decks` раз.
pub fn verify_integrity(shoe: &Shoe, num_decks: usize) -> Result<(), StructuralFailure> {
    let mut seen = vec![0u8; shoe.deck.len()];
    for id in shoe.dealing_order() {
        match seen.get_mut(id) {
            Some(slot) if *slot == 0 => *slot = 1,
            _ => return Err(StructuralFailure::CoverageMismatch(id)),
        }
    }
    if let Some(missing) = seen.iter().position(|&s| s == 0) {
        return Err(StructuralFailure::CoverageMismatch(missing));
    }

    let counts = shoe.deck.face_counts();
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            let actual = counts.get(&CardFace::new(rank, suit)).copied().unwrap_or(0);
            if actual != num_decks {
                return Err(StructuralFailure::MultisetMismatch {
                    rank,
                    suit,
                    actual,
                    expected: num_decks,
                });
            }
        }
    }
    Ok(())
}
