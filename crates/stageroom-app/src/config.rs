//! Client configuration.

use crate::{AvatarService, RoomCodes};

/// Static client configuration, resolved once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Room code per role for token acquisition.
    pub room_codes: RoomCodes,
    /// Avatar URL source for roster rows.
    pub avatars: AvatarService,
}

impl ClientConfig {
    /// Configuration with the given room codes and the default avatar
    /// service.
    pub fn new(room_codes: RoomCodes) -> Self {
        Self { room_codes, avatars: AvatarService::default() }
    }

    /// Replace the avatar service.
    #[must_use]
    pub fn with_avatars(mut self, avatars: AvatarService) -> Self {
        self.avatars = avatars;
        self
    }
}
