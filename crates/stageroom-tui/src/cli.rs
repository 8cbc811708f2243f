//! Command line arguments.
//!
//! Every option has an environment fallback so the client can be configured
//! the same way as a deployment would inject room codes.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use stageroom_app::{AvatarService, ClientConfig, RoomCodes};
use stageroom_core::RoleName;
use stageroom_store::LocalStoreConfig;

/// Stageroom terminal client
#[derive(Parser, Debug, Clone)]
#[command(name = "stageroom-tui")]
#[command(about = "Terminal client for Stageroom audio rooms")]
#[command(version)]
pub struct Args {
    /// Room code exchanged for listener tokens
    #[arg(long, env = "LISTENER_ROOM_CODE", default_value = "listener-room")]
    pub listener_room_code: String,

    /// Room code exchanged for speaker tokens
    #[arg(long, env = "SPEAKER_ROOM_CODE", default_value = "speaker-room")]
    pub speaker_room_code: String,

    /// Room code exchanged for moderator tokens
    #[arg(long, env = "MODERATOR_ROOM_CODE", default_value = "moderator-room")]
    pub moderator_room_code: String,

    /// Base URL for roster avatars
    #[arg(long, env = "STAGEROOM_AVATAR_URL", default_value = AvatarService::DEFAULT_BASE_URL)]
    pub avatar_url: String,

    /// Simulated latency of token exchange and join, in milliseconds
    #[arg(long, default_value_t = 300)]
    pub latency_ms: u64,

    /// Number of other participants already in the room
    #[arg(long, default_value_t = 4)]
    pub demo_peers: usize,

    /// Let a participant join or leave every N seconds
    #[arg(long)]
    pub churn_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long, env = "STAGEROOM_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Room codes keyed by role.
    pub fn room_codes(&self) -> RoomCodes {
        RoomCodes::new(
            self.listener_room_code.clone(),
            self.speaker_room_code.clone(),
            self.moderator_room_code.clone(),
        )
    }

    /// Client side configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.room_codes())
            .with_avatars(AvatarService::new(self.avatar_url.clone()))
    }

    /// In-process store accepting the same room codes as the client.
    pub fn store_config(&self) -> LocalStoreConfig {
        LocalStoreConfig::default()
            .with_room_code(self.listener_room_code.clone(), RoleName::Listener)
            .with_room_code(self.speaker_room_code.clone(), RoleName::Speaker)
            .with_room_code(self.moderator_room_code.clone(), RoleName::Moderator)
            .with_latency(Duration::from_millis(self.latency_ms))
    }

    /// Churn period, if enabled.
    pub fn churn(&self) -> Option<Duration> {
        self.churn_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_accepts_client_codes() {
        let args = Args::try_parse_from([
            "stageroom-tui",
            "--listener-room-code",
            "l-1",
            "--speaker-room-code",
            "s-1",
            "--moderator-room-code",
            "m-1",
        ])
        .unwrap();

        let client = args.client_config();
        let store = args.store_config();

        for role in RoleName::BUILTIN {
            let code = client.room_codes.code_for(&role).unwrap();
            assert_eq!(store.room_codes.get(code), Some(&role));
        }
    }

    #[test]
    fn latency_and_avatars_are_applied() {
        let args = Args::try_parse_from([
            "stageroom-tui",
            "--latency-ms",
            "0",
            "--avatar-url",
            "https://avatars.test",
        ])
        .unwrap();

        assert_eq!(args.store_config().latency, Duration::ZERO);
        assert_eq!(args.client_config().avatars.url_for("bob"), "https://avatars.test/bob");
    }

    #[test]
    fn zero_churn_disables_it() {
        let args = Args::try_parse_from(["stageroom-tui", "--churn-secs", "0"]).unwrap();
        assert_eq!(args.churn(), None);

        let args = Args::try_parse_from(["stageroom-tui", "--churn-secs", "5"]).unwrap();
        assert_eq!(args.churn(), Some(Duration::from_secs(5)));
    }
}
