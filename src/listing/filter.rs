//! Request-scoped admission filters for the game browser
//!
//! A filter sees the request context, never the search criteria. It hands
//! back a predicate that the selector applies to every joinable room.

use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use crate::game::Room;

/// Facts about the caller available to filters
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub client_addr: Option<SocketAddr>,
    pub user_agent: Option<String>,
    pub client_version: Option<i32>,
}

/// Predicate over rooms, bound to one request
pub type RoomPredicate<'a> = Box<dyn Fn(&Room) -> bool + Send + Sync + 'a>;

/// Admission policy plugged into the listing endpoint.
///
/// Predicates must not panic. A room the filter cannot judge is rejected.
pub trait ListingFilter: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn predicate<'a>(&'a self, ctx: &RequestContext) -> RoomPredicate<'a>;
}

/// The filters active on this server
#[derive(Clone, Default)]
pub struct FilterSet {
    filters: Vec<Arc<dyn ListingFilter>>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: impl ListingFilter + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn push(&mut self, filter: Arc<dyn ListingFilter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Bind every filter to this request
    pub fn resolve(&self, ctx: &RequestContext) -> Vec<RoomPredicate<'_>> {
        self.filters.iter().map(|f| f.predicate(ctx)).collect()
    }
}

/// Hides rooms hosted by banned players
pub struct BannedHostFilter {
    banned: HashSet<String>,
}

impl BannedHostFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            banned: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl ListingFilter for BannedHostFilter {
    fn name(&self) -> &'static str {
        "banned_host"
    }

    fn predicate<'a>(&'a self, _ctx: &RequestContext) -> RoomPredicate<'a> {
        Box::new(move |room: &Room| match &room.host_name {
            Some(name) => !self.banned.contains(name),
            None => true,
        })
    }
}

/// Hides rooms on loopback or private addresses from public callers.
///
/// Such rooms are only reachable from the server's own network. A caller
/// whose address is unknown counts as public.
#[derive(Debug, Default)]
pub struct PrivateAddressFilter;

fn is_local(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_loopback() || v4.is_private() || v4.is_link_local(),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_local(IpAddr::V4(v4)),
            // fc00::/7 unique local
            None => v6.is_loopback() || (v6.segments()[0] & 0xfe00) == 0xfc00,
        },
    }
}

impl ListingFilter for PrivateAddressFilter {
    fn name(&self) -> &'static str {
        "private_address"
    }

    fn predicate<'a>(&'a self, ctx: &RequestContext) -> RoomPredicate<'a> {
        let caller_is_local = ctx.client_addr.map(|a| is_local(a.ip())).unwrap_or(false);
        if caller_is_local {
            return Box::new(|_: &Room| true);
        }
        Box::new(|room: &Room| !is_local(room.public_addr.ip()))
    }
}
