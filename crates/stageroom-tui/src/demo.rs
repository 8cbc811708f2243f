//! Demo room population.
//!
//! Seeds the in-process room with other participants and optionally keeps
//! it moving, so the roster has something to show.

use std::time::Duration;

use rand::{Rng, seq::IndexedRandom};
use stageroom_core::{PeerId, RoleName};
use stageroom_store::RoomHandle;
use tokio::task::JoinHandle;

const NAMES: [&str; 12] = [
    "ada", "grace", "linus", "barbara", "ken", "margaret", "dennis", "frances", "niklaus",
    "radia", "edsger", "hedy",
];

const SEED_ROLES: [RoleName; 3] = [RoleName::Speaker, RoleName::Listener, RoleName::Moderator];

/// Add `count` participants with cycling roles. Returns their ids.
pub fn seed(room: &RoomHandle, count: usize) -> Vec<PeerId> {
    (0..count)
        .map(|i| {
            let name = demo_name(i);
            let role = SEED_ROLES[i % SEED_ROLES.len()].clone();
            room.add_peer(name, role)
        })
        .collect()
}

fn demo_name(i: usize) -> String {
    let base = NAMES[i % NAMES.len()];
    match i / NAMES.len() {
        0 => base.to_string(),
        round => format!("{base}{round}"),
    }
}

/// One change to the room.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Churn {
    Join(String, RoleName),
    Leave(PeerId),
}

fn next_churn(room: &RoomHandle, rng: &mut impl Rng) -> Option<Churn> {
    let remote: Vec<PeerId> =
        room.members().into_iter().filter(|p| !p.is_local).map(|p| p.id).collect();

    if remote.is_empty() || rng.random_bool(0.5) {
        let name = NAMES.choose(rng)?;
        let role = SEED_ROLES.choose(rng)?.clone();
        Some(Churn::Join((*name).to_string(), role))
    } else {
        remote.choose(rng).cloned().map(Churn::Leave)
    }
}

/// Every `period`, let a random participant join or leave.
///
/// The local peer is never touched. The task runs until aborted.
pub fn spawn_churn(room: RoomHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await;
        loop {
            interval.tick().await;
            let churn = next_churn(&room, &mut rand::rng());
            match churn {
                Some(Churn::Join(name, role)) => {
                    let peer_id = room.add_peer(name, role);
                    tracing::debug!(%peer_id, "demo peer joined");
                },
                Some(Churn::Leave(peer_id)) => {
                    room.remove_peer(&peer_id);
                    tracing::debug!(%peer_id, "demo peer left");
                },
                None => {},
            }
        }
    })
}
