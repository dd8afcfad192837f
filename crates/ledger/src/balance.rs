//! Derived balance: a pure fold over an article's movement history.

use crate::movement::Movement;

/// Compute the balance implied by a movement sequence, in the order given.
///
/// Starts from 0 and sums each movement's signed delta. The result may be
/// negative when the history is inconsistent; callers treat a negative
/// balance as an overdraw signal, not a ledger error, so no clamping
/// happens here.
///
/// Balances have no storage or identity of their own: every call recomputes
/// from the full history it is given, linear in the number of movements.
pub fn current_balance<'a, I>(movements: I) -> i64
where
    I: IntoIterator<Item = &'a Movement>,
{
    movements.into_iter().map(Movement::signed_delta).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{MovementDraft, MovementKind};
    use chrono::Utc;
    use proptest::prelude::*;
    use stockbook_core::{ArticleId, MovementId, UserId};

    fn movement(kind: MovementKind, quantity: i64) -> Movement {
        MovementDraft::new(ArticleId::new(), kind, quantity, UserId::new())
            .assign(MovementId::new(), Utc::now())
    }

    #[test]
    fn empty_history_yields_zero() {
        let history: Vec<Movement> = Vec::new();
        assert_eq!(current_balance(&history), 0);
    }

    #[test]
    fn fold_follows_kind_direction() {
        let history = [
            movement(MovementKind::Entry, 10),
            movement(MovementKind::Exit, 3),
            movement(MovementKind::Adjustment, 2),
            movement(MovementKind::Exit, 1),
        ];
        assert_eq!(current_balance(&history), 8);
    }

    #[test]
    fn inventory_movements_add_without_resetting() {
        let history = [
            movement(MovementKind::Entry, 5),
            movement(MovementKind::Inventory, 2),
        ];
        assert_eq!(current_balance(&history), 7);
    }

    #[test]
    fn overdraw_goes_negative_instead_of_clamping() {
        let history = [movement(MovementKind::Exit, 4)];
        assert_eq!(current_balance(&history), -4);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the balance equals the sum of signed deltas, for any
        /// sequence of kinds and quantities.
        #[test]
        fn balance_equals_sum_of_signed_deltas(
            entries in prop::collection::vec((0u8..4, 0i64..1_000_000i64), 0..50)
        ) {
            let history: Vec<Movement> = entries
                .iter()
                .map(|&(kind, quantity)| {
                    let kind = match kind {
                        0 => MovementKind::Entry,
                        1 => MovementKind::Exit,
                        2 => MovementKind::Adjustment,
                        _ => MovementKind::Inventory,
                    };
                    movement(kind, quantity)
                })
                .collect();

            let expected: i64 = history.iter().map(Movement::signed_delta).sum();
            prop_assert_eq!(current_balance(&history), expected);
        }

        /// Property: appending an entry raises the balance by exactly its
        /// quantity; appending an exit lowers it by the same amount.
        #[test]
        fn append_shifts_balance_by_quantity(quantity in 0i64..1_000_000i64) {
            let mut history = vec![movement(MovementKind::Entry, 10)];
            let before = current_balance(&history);

            history.push(movement(MovementKind::Entry, quantity));
            prop_assert_eq!(current_balance(&history), before + quantity);

            history.push(movement(MovementKind::Exit, quantity));
            prop_assert_eq!(current_balance(&history), before);
        }
    }
}
