//! Search criteria and the desirability check

use crate::game::{Language, MapType, Room};

/// What a client is looking for in a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Criteria {
    /// Bit `i` set means map `i` is acceptable. Zero accepts no map.
    pub map_mask: u32,
    /// Exact chat language, no wildcard
    pub language: Language,
    /// Wanted impostor count, 0 for any
    pub impostor_count: i32,
}

impl Criteria {
    pub fn new(map_mask: u32, language: Language, impostor_count: i32) -> Self {
        Self {
            map_mask,
            language,
            impostor_count,
        }
    }

    pub fn accepts_map(&self, map: MapType) -> bool {
        self.map_mask
            .checked_shr(map.bit())
            .map(|m| m & 1 == 1)
            .unwrap_or(false)
    }

    pub fn accepts_impostors(&self, num_impostors: i32) -> bool {
        self.impostor_count == 0 || self.impostor_count == num_impostors
    }

    /// True when the room matches every preference exactly
    pub fn is_desired(&self, room: &Room) -> bool {
        self.accepts_map(room.options.map)
            && self.language == room.options.language
            && self.accepts_impostors(room.options.num_impostors)
    }
}
