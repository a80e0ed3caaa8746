//! Wire records sent to game clients
//! Field names and encodings must stay exactly as existing clients expect.

use std::net::{IpAddr, SocketAddr};

use serde::Serialize;
use serde_repr::Serialize_repr;

use crate::game::{Language, MapType, Platform, Room};

/// Shown when a room has no host attached
pub const UNKNOWN_HOST_NAME: &str = "Unknown host";

/// Clients require a host platform name but never display it
const HOST_PLATFORM_NAME: &str = "test";

/// Pack an address into the client's integer form: first four address bytes,
/// little-endian (byte 0 is least significant).
pub fn ip_to_int(ip: IpAddr) -> u32 {
    let octets = match ip {
        IpAddr::V4(v4) => v4.octets(),
        IpAddr::V6(v6) => {
            let b = v6.octets();
            [b[0], b[1], b[2], b[3]]
        }
    };
    u32::from_le_bytes(octets)
}

/// One entry of the game browser
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameListing {
    #[serde(rename = "IP")]
    pub ip: u32,
    #[serde(rename = "Port")]
    pub port: u16,
    #[serde(rename = "GameId")]
    pub game_id: i32,
    #[serde(rename = "PlayerCount")]
    pub player_count: i32,
    #[serde(rename = "HostName")]
    pub host_name: String,
    #[serde(rename = "HostPlatformName")]
    pub host_platform_name: String,
    #[serde(rename = "Platform")]
    pub platform: Platform,
    #[serde(rename = "Age")]
    pub age: i32,
    #[serde(rename = "MaxPlayers")]
    pub max_players: i32,
    #[serde(rename = "NumImpostors")]
    pub num_impostors: i32,
    #[serde(rename = "MapId")]
    pub map_id: MapType,
    #[serde(rename = "Language")]
    pub language: Language,
}

impl GameListing {
    pub fn new(room: &Room) -> Self {
        Self {
            ip: ip_to_int(room.public_addr.ip()),
            port: room.public_addr.port(),
            game_id: room.code.0,
            player_count: room.player_count,
            host_name: room
                .host_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_HOST_NAME.to_string()),
            host_platform_name: HOST_PLATFORM_NAME.to_string(),
            platform: Platform::StandaloneSteamPc,
            age: 0,
            max_players: room.options.max_players,
            num_impostors: room.options.num_impostors,
            map_id: room.options.map,
            language: room.options.language,
        }
    }
}

/// Address of a game server, as returned by the lookup endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HostServer {
    #[serde(rename = "Ip")]
    pub ip: i64,
    #[serde(rename = "Port")]
    pub port: i32,
}

impl HostServer {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            ip: i64::from(ip_to_int(addr.ip())),
            port: i32::from(addr.port()),
        }
    }
}

/// Reasons a matchmaking request can fail, as numbered by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr)]
#[repr(u8)]
pub enum DisconnectReason {
    GameMissing = 3,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchmakerError {
    #[serde(rename = "Reason")]
    pub reason: DisconnectReason,
}

/// Error body understood by the client's matchmaker
#[derive(Debug, Clone, Serialize)]
pub struct MatchmakerResult {
    #[serde(rename = "Errors")]
    pub errors: Vec<MatchmakerError>,
}

impl MatchmakerResult {
    pub fn error(reason: DisconnectReason) -> Self {
        Self {
            errors: vec![MatchmakerError { reason }],
        }
    }
}
