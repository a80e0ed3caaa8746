//! Rooms published by the game server

pub mod registry;
pub mod room;

pub use registry::RoomRegistry;
pub use room::{GameCode, GameOptions, GameState, Language, MapType, Platform, Room};
