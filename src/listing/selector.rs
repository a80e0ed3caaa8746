//! Single-pass selection of rooms for the game browser

use std::borrow::Borrow;

use crate::game::Room;

use super::criteria::Criteria;
use super::filter::RoomPredicate;

/// Number of rooms listed when the caller does not ask for a limit
pub const DEFAULT_MAX_LISTINGS: usize = 10;

/// Pick at most `cap` joinable rooms, exact matches first.
///
/// Rooms are walked once in the order given. A room that passes every
/// predicate and matches `criteria` is taken right away. Other eligible rooms
/// are kept as fallback, first seen first, but only as many as could still
/// fit. Fallback rooms fill whatever room is left after the walk.
pub fn select_listings<R, I>(
    rooms: I,
    criteria: &Criteria,
    predicates: &[RoomPredicate<'_>],
    cap: usize,
) -> Vec<R>
where
    I: IntoIterator<Item = R>,
    R: Borrow<Room>,
{
    let mut selected: Vec<R> = Vec::with_capacity(cap.min(DEFAULT_MAX_LISTINGS));
    if cap == 0 {
        return selected;
    }

    let mut fallback: Vec<R> = Vec::new();

    for candidate in rooms {
        let room: &Room = candidate.borrow();

        if !room.is_joinable() {
            continue;
        }

        if !predicates.iter().all(|accepts| accepts(room)) {
            continue;
        }

        if criteria.is_desired(room) {
            selected.push(candidate);
            if selected.len() == cap {
                return selected;
            }
        } else if fallback.len() < cap - selected.len() {
            fallback.push(candidate);
        }
    }

    let remaining = cap - selected.len();
    selected.extend(fallback.into_iter().take(remaining));
    selected
}
