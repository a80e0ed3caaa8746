//! Game browser: criteria, admission filters, room selection and wire records

pub mod criteria;
pub mod filter;
pub mod presenter;
pub mod selector;

pub use criteria::Criteria;
pub use filter::{
    BannedHostFilter, FilterSet, ListingFilter, PrivateAddressFilter, RequestContext,
    RoomPredicate,
};
pub use presenter::{DisconnectReason, GameListing, HostServer, MatchmakerResult};
pub use selector::{select_listings, DEFAULT_MAX_LISTINGS};

use std::sync::Arc;

use tracing::debug;

use crate::game::{Room, RoomRegistry};

/// Find rooms to show a client, bound to the current registry contents
pub fn find_listings(
    registry: &RoomRegistry,
    filters: &FilterSet,
    ctx: &RequestContext,
    criteria: &Criteria,
    cap: usize,
) -> Vec<Arc<Room>> {
    let predicates = filters.resolve(ctx);
    let rooms = registry.snapshot();
    let total = rooms.len();

    let listings = select_listings(rooms, criteria, &predicates, cap);

    debug!(
        map_mask = criteria.map_mask,
        language = criteria.language.0,
        impostors = criteria.impostor_count,
        cap,
        total_rooms = total,
        listed = listings.len(),
        "Selected game listings"
    );

    listings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameCode, GameOptions, Language, MapType};

    #[test]
    fn test_find_listings_reads_registry() {
        let registry = RoomRegistry::new();
        for code in 1..=3 {
            let mut room = Room::new(
                GameCode(code),
                "203.0.113.5:22023".parse().unwrap(),
                GameOptions {
                    map: MapType::Skeld,
                    language: Language::ENGLISH,
                    num_impostors: 1,
                    max_players: 10,
                },
            );
            room.is_public = code != 2;
            room.host_name = Some(format!("host{}", code));
            registry.insert(room);
        }

        let filters = FilterSet::new().with(BannedHostFilter::new(["host3"]));
        let criteria = Criteria::new(1, Language::ENGLISH, 0);
        let ctx = RequestContext::default();

        let listings = find_listings(&registry, &filters, &ctx, &criteria, 10);
        let codes: Vec<GameCode> = listings.iter().map(|r| r.code).collect();
        assert_eq!(codes, vec![GameCode(1)]);

        let again = find_listings(&registry, &filters, &ctx, &criteria, 10);
        assert_eq!(listings, again);
    }
}
