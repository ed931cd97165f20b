//! Authorization seam for administrative draft operations.
//!
//! Identity itself is external; the engine only ever asks one question:
//! does this user own this league. Pick authority is a different check
//! entirely (team on the clock) and never goes through here.

use std::collections::HashMap;
use std::future::Future;

use warroom_protocol::{LeagueId, UserId};

/// Answers ownership checks for lifecycle operations.
///
/// Declared in desugared `impl Future + Send` form so engine calls stay
/// spawnable; implementations write plain `async fn`.
pub trait Authorizer: Send + Sync + 'static {
    fn is_league_owner(&self, user: UserId, league: LeagueId) -> impl Future<Output = bool> + Send;
}

/// Grants everything. For demos and tests that are not about authorization.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAuthorizer;

impl Authorizer for OpenAuthorizer {
    async fn is_league_owner(&self, _user: UserId, _league: LeagueId) -> bool {
        true
    }
}

/// Static owner map, one owner per league.
#[derive(Debug, Clone, Default)]
pub struct OwnerTable {
    owners: HashMap<LeagueId, UserId>,
}

impl OwnerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(mut self, league: LeagueId, owner: UserId) -> Self {
        self.owners.insert(league, owner);
        self
    }
}

impl Authorizer for OwnerTable {
    async fn is_league_owner(&self, user: UserId, league: LeagueId) -> bool {
        self.owners.get(&league) == Some(&user)
    }
}
