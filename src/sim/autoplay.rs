//! Pick chooser for demo/idle play

use std::collections::BTreeMap;

use super::state::{BodyMode, FruitId, FruitType, GameState};
use super::tray::MATCH_SIZE;

/// Choose the next fruit to pick, or `None` if picking now would overflow the tray.
///
/// Prefers types already waiting in the tray (finishing triples first), then
/// the type with the most fruits on the board. Only types that can still
/// reach a triple are considered when any exist. Ties go to the lowest id.
/// Fruits still settling after their spawn are never chosen.
pub fn choose_pick(state: &GameState) -> Option<FruitId> {
    let tray = state.tray();
    if tray.is_full() || state.board().is_empty() {
        return None;
    }

    let mut on_board: BTreeMap<FruitType, usize> = BTreeMap::new();
    for fruit in state.board() {
        *on_board.entry(fruit.fruit_type).or_insert(0) += 1;
    }

    let completable =
        |t: FruitType| tray.count_of(t) + on_board.get(&t).copied().unwrap_or(0) >= MATCH_SIZE;
    let any_completable = on_board.keys().any(|&t| completable(t));

    // Tray has room for only one more: anything but a finishing pick loses next turn
    let last_slot = tray.capacity() - tray.len() == 1;

    state
        .board()
        .iter()
        .filter(|f| f.body == BodyMode::Dynamic)
        .filter(|f| !any_completable || completable(f.fruit_type))
        .filter(|f| !last_slot || tray.count_of(f.fruit_type) == MATCH_SIZE - 1 || tray.is_empty())
        .max_by(|a, b| {
            let key = |t: FruitType| (tray.count_of(t), on_board.get(&t).copied().unwrap_or(0));
            key(a.fruit_type)
                .cmp(&key(b.fruit_type))
                .then(b.id.cmp(&a.id))
        })
        .map(|f| f.id)
}
