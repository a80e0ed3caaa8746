//! Integration tests: a game server publishing rooms while clients browse.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use game_listing_server::app::AppState;
use game_listing_server::config::Config;
use game_listing_server::game::{
    GameCode, GameOptions, GameState, Language, MapType, Room, RoomRegistry,
};
use game_listing_server::http::build_router;

fn lobby(code: i32, map: MapType, host: &str) -> Room {
    let mut room = Room::new(
        GameCode(code),
        "198.51.100.20:22023".parse().unwrap(),
        GameOptions {
            map,
            language: Language::ENGLISH,
            num_impostors: 2,
            max_players: 4,
        },
    );
    room.is_public = true;
    room.player_count = 1;
    room.host_name = Some(host.to_string());
    room
}

async fn listed(app: &Router, query: &str) -> Vec<(i64, String)> {
    let request = Request::builder()
        .uri(format!("/api/games?{}", query))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    body.as_array()
        .unwrap()
        .iter()
        .map(|l| {
            (
                l["GameId"].as_i64().unwrap(),
                l["HostName"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

async fn lookup(app: &Router, code: i32) -> StatusCode {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/games?gameId={}", code))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_listings_follow_room_lifecycle() {
    let rooms = Arc::new(RoomRegistry::new());
    let app = build_router(AppState::new(Config::default(), rooms.clone()));

    let polus_only = format!("mapId={}&lang=256&numImpostors=2", 1 << MapType::Polus.bit());

    assert!(listed(&app, &polus_only).await.is_empty());

    rooms.insert(lobby(10, MapType::Polus, "Red"));
    rooms.insert(lobby(11, MapType::Skeld, "Blue"));

    let result = listed(&app, &polus_only).await;
    assert_eq!(result.len(), 2);
    assert_eq!(result[0], (10, "Red".to_string()));
    assert_eq!(result[1], (11, "Blue".to_string()));

    // Lobby fills up
    assert!(rooms.update(GameCode(10), |r| r.player_count = 4));
    assert_eq!(listed(&app, &polus_only).await, vec![(11, "Blue".to_string())]);

    // Game starts; it is still resolvable but no longer listed
    assert!(rooms.update(GameCode(11), |r| r.state = GameState::Started));
    assert!(listed(&app, &polus_only).await.is_empty());
    assert_eq!(lookup(&app, 11).await, StatusCode::OK);

    // Room destroyed
    rooms.remove(GameCode(11));
    assert_eq!(lookup(&app, 11).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_browsing_while_publishing() {
    let rooms = Arc::new(RoomRegistry::new());
    let config = Config {
        listing_rate_limit: 10_000,
        ..Config::default()
    };
    let app = build_router(AppState::new(config, rooms.clone()));

    let publisher = {
        let rooms = rooms.clone();
        tokio::spawn(async move {
            for code in 0..200 {
                rooms.insert(lobby(code, MapType::Airship, "Host"));
                if code % 3 == 0 {
                    rooms.remove(GameCode(code));
                }
                tokio::task::yield_now().await;
            }
        })
    };

    let mut browsers = Vec::new();
    for _ in 0..4 {
        let app = app.clone();
        browsers.push(tokio::spawn(async move {
            for _ in 0..25 {
                let result = listed(&app, "mapId=16&lang=256").await;
                assert!(result.len() <= 10);
            }
        }));
    }

    publisher.await.unwrap();
    for browser in browsers {
        browser.await.unwrap();
    }

    assert_eq!(listed(&app, "mapId=16&lang=256").await.len(), 10);
}
