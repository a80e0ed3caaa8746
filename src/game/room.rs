//! Room model as seen by the game browser

use std::fmt;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Numeric identity of a room, as sent by clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameCode(pub i32);

impl fmt::Display for GameCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Lobby open, waiting for the host to start
    NotStarted,
    /// Start countdown running
    Starting,
    /// Game in progress
    Started,
    /// Game over, players returning to lobby
    Ended,
    /// Room torn down, pending removal
    Destroyed,
}

/// Maps known to the client. The discriminant is the map's bit in a map mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum MapType {
    Skeld = 0,
    MiraHq = 1,
    Polus = 2,
    Dleks = 3,
    Airship = 4,
    Fungle = 5,
}

impl MapType {
    /// Bit index of this map inside a map mask
    pub fn bit(self) -> u32 {
        self as u32
    }
}

/// Chat language keyword of a room.
///
/// Kept as a raw value so unknown languages sent by newer clients still
/// round-trip and compare by equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(pub u32);

impl Language {
    pub const OTHER: Language = Language(1);
    pub const SPANISH_LA: Language = Language(2);
    pub const KOREAN: Language = Language(4);
    pub const RUSSIAN: Language = Language(8);
    pub const PORTUGUESE: Language = Language(16);
    pub const ARABIC: Language = Language(32);
    pub const FILIPINO: Language = Language(64);
    pub const POLISH: Language = Language(128);
    pub const ENGLISH: Language = Language(256);
    pub const JAPANESE: Language = Language(512);
    pub const SPANISH_EU: Language = Language(1024);
    pub const BRAZILIAN: Language = Language(2048);
    pub const DUTCH: Language = Language(4096);
    pub const FRENCH: Language = Language(8192);
    pub const GERMAN: Language = Language(16384);
    pub const ITALIAN: Language = Language(32768);
    pub const SCHINESE: Language = Language(65536);
    pub const TCHINESE: Language = Language(131072);
    pub const IRISH: Language = Language(262144);
}

/// Client platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Platform {
    Unknown = 0,
    StandaloneEpicPc = 1,
    StandaloneSteamPc = 2,
    StandaloneMac = 3,
    StandaloneWin10 = 4,
    StandaloneItch = 5,
    IPhone = 6,
    Android = 7,
    Switch = 8,
    Xbox = 9,
    Playstation = 10,
}

/// Options the host configured for a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    pub map: MapType,
    pub language: Language,
    pub num_impostors: i32,
    pub max_players: i32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            map: MapType::Skeld,
            language: Language::ENGLISH,
            num_impostors: 1,
            max_players: 10,
        }
    }
}

/// A game room as published by the game server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub code: GameCode,
    pub is_public: bool,
    pub state: GameState,
    pub player_count: i32,
    pub options: GameOptions,
    /// Address clients connect to for this room
    pub public_addr: SocketAddr,
    /// Display name of the host, if a host is attached
    pub host_name: Option<String>,
}

impl Room {
    pub fn new(code: GameCode, public_addr: SocketAddr, options: GameOptions) -> Self {
        Self {
            code,
            is_public: false,
            state: GameState::NotStarted,
            player_count: 0,
            options,
            public_addr,
            host_name: None,
        }
    }

    /// Whether a new player could join this room from the browser
    pub fn is_joinable(&self) -> bool {
        self.is_public
            && self.state == GameState::NotStarted
            && self.player_count < self.options.max_players
    }
}
