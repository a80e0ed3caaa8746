//! Application state shared across routes

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::game::RoomRegistry;
use crate::listing::{BannedHostFilter, FilterSet, PrivateAddressFilter};
use crate::util::rate_limit::ListingRateLimiter;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub rooms: Arc<RoomRegistry>,
    pub filters: FilterSet,
    pub listing_limiter: ListingRateLimiter,
}

impl AppState {
    pub fn new(config: Config, rooms: Arc<RoomRegistry>) -> Self {
        let config = Arc::new(config);

        // Listing filters, in evaluation order
        let mut filters = FilterSet::new();
        if !config.banned_hosts.is_empty() {
            filters = filters.with(BannedHostFilter::new(config.banned_hosts.iter().cloned()));
        }
        if !config.allow_private_rooms {
            filters = filters.with(PrivateAddressFilter);
        }

        info!(filters = ?filters.names(), "Listing filters registered");

        let listing_limiter = ListingRateLimiter::new(config.listing_rate_limit);

        Self {
            config,
            rooms,
            filters,
            listing_limiter,
        }
    }
}
