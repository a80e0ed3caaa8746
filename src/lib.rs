//! Public game browser for a multiplayer game server.
//!
//! The game server publishes its rooms into a [`game::RoomRegistry`]; the
//! router from [`http::build_router`] serves listings and lookups from it.

pub mod app;
pub mod config;
pub mod game;
pub mod http;
pub mod listing;
pub mod session;
pub mod util;
