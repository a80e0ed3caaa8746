//! Registry of rooms published by the game server

use dashmap::DashMap;
use std::sync::Arc;

use super::room::{GameCode, Room};

/// Concurrent registry of all live rooms.
///
/// The game server owns room lifecycle and publishes each change by
/// replacing the room's entry. Readers only ever see whole `Room` values.
pub struct RoomRegistry {
    rooms: DashMap<GameCode, Arc<Room>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    pub fn find(&self, code: GameCode) -> Option<Arc<Room>> {
        self.rooms.get(&code).map(|r| r.value().clone())
    }

    /// Publish a room, replacing any previous entry with the same code
    pub fn insert(&self, room: Room) {
        self.rooms.insert(room.code, Arc::new(room));
    }

    pub fn remove(&self, code: GameCode) -> Option<Arc<Room>> {
        self.rooms.remove(&code).map(|(_, r)| r)
    }

    /// Apply a change to a room and publish the result.
    /// Returns false if no room has this code.
    pub fn update<F>(&self, code: GameCode, f: F) -> bool
    where
        F: FnOnce(&mut Room),
    {
        match self.rooms.get_mut(&code) {
            Some(mut entry) => {
                let mut room = Room::clone(entry.value());
                f(&mut room);
                // The code is the key; keep it stable.
                room.code = code;
                *entry.value_mut() = Arc::new(room);
                true
            }
            None => false,
        }
    }

    /// Point-in-time view of all rooms, in registry iteration order
    pub fn snapshot(&self) -> Vec<Arc<Room>> {
        self.rooms.iter().map(|r| r.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn total_players(&self) -> usize {
        self.rooms
            .iter()
            .map(|r| r.value().player_count.max(0) as usize)
            .sum()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
