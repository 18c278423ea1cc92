use std::collections::HashMap;
use std::sync::Arc;

use serenity::model::id::GuildId;
use tokio::sync::RwLock;

/// Identifies one idle period. A timer only acts if its ticket is still the
/// armed one when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct Activity {
    generation: u64,
    /// Things currently keeping the guild busy (clips playing).
    busy: usize,
    armed: Option<Ticket>,
}

impl Activity {
    fn arm(&mut self) -> Ticket {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        self.armed = Some(ticket);
        ticket
    }
}

/// The idle period `ticket` was armed for is still running: nothing started
/// since and nothing is busy.
fn still_idle(activity: &Activity, ticket: Ticket) -> bool {
    activity.busy == 0 && activity.armed == Some(ticket)
}

/// Per-guild idle bookkeeping for the voice disconnect timers.
#[derive(Clone, Default)]
pub struct IdleTracker {
    guilds: Arc<RwLock<HashMap<GuildId, Activity>>>,
}

impl IdleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Something started; any armed timer for the guild is void.
    pub async fn start(&self, guild_id: GuildId) {
        let mut guilds = self.guilds.write().await;
        let activity = guilds.entry(guild_id).or_default();
        activity.busy += 1;
        activity.armed = None;
    }

    /// Something finished. Returns a ticket when the guild just went idle.
    pub async fn finish(&self, guild_id: GuildId) -> Option<Ticket> {
        let mut guilds = self.guilds.write().await;
        let activity = guilds.get_mut(&guild_id)?;
        activity.busy = activity.busy.saturating_sub(1);
        (activity.busy == 0).then(|| activity.arm())
    }

    /// Starts an idle period unless one is already running or the guild is busy.
    pub async fn arm(&self, guild_id: GuildId) -> Option<Ticket> {
        let mut guilds = self.guilds.write().await;
        let activity = guilds.entry(guild_id).or_default();
        if activity.busy > 0 || activity.armed.is_some() {
            return None;
        }
        Some(activity.arm())
    }

    pub async fn cancel(&self, guild_id: GuildId) {
        let mut guilds = self.guilds.write().await;
        if let Some(activity) = guilds.get_mut(&guild_id) {
            activity.armed = None;
        }
    }

    /// Called when a timer fires. True at most once per ticket, and only if
    /// the guild stayed idle for the whole period.
    pub async fn expire(&self, guild_id: GuildId, ticket: Ticket) -> bool {
        let mut guilds = self.guilds.write().await;
        let Some(activity) = guilds.get_mut(&guild_id) else {
            return false;
        };
        if !still_idle(activity, ticket) {
            return false;
        }
        activity.armed = None;
        true
    }

    /// Drops everything known about the guild (the bot left voice).
    pub async fn forget(&self, guild_id: GuildId) {
        self.guilds.write().await.remove(&guild_id);
    }
}
