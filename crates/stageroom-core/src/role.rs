//! Roles and their permission bundles.
//!
//! A room knows three built-in roles. [`RoleName::Other`] carries any
//! additional role a store might report so that roster labels never lose
//! information, but such roles have no entry in the standard capability
//! table.

use std::{collections::BTreeMap, convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Name of a role.
///
/// Parsing is case-insensitive and ignores surrounding whitespace for the
/// built-in names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoleName {
    /// Can only listen. Never publishes audio.
    Listener,
    /// Publishes audio, may mute/unmute only itself.
    Speaker,
    /// Full control, including changing other peers' roles.
    Moderator,
    /// Any role outside the built-in set.
    Other(String),
}

impl RoleName {
    /// Built-in roles in join-form order.
    pub const BUILTIN: [Self; 3] = [Self::Listener, Self::Speaker, Self::Moderator];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Listener => "listener",
            Self::Speaker => "speaker",
            Self::Moderator => "moderator",
            Self::Other(name) => name,
        }
    }

    /// Whether this is one of the three built-in roles.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl FromStr for RoleName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let role = match trimmed.to_ascii_lowercase().as_str() {
            "listener" => Self::Listener,
            "speaker" => Self::Speaker,
            "moderator" => Self::Moderator,
            _ => Self::Other(trimmed.to_string()),
        };
        Ok(role)
    }
}

impl From<&str> for RoleName {
    fn from(name: &str) -> Self {
        match name.parse() {
            Ok(role) => role,
            Err(never) => match never {},
        }
    }
}

impl From<String> for RoleName {
    fn from(name: String) -> Self {
        name.as_str().into()
    }
}

impl From<RoleName> for String {
    fn from(role: RoleName) -> Self {
        match role {
            RoleName::Other(name) => name,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission flags attached to a role.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    /// May change the role of any peer.
    pub change_role: bool,
    /// May mute other peers.
    pub mute: bool,
    /// May ask other peers to unmute.
    pub unmute: bool,
    /// May remove other peers from the room.
    pub remove_others: bool,
    /// May end the room for everyone.
    pub end_room: bool,
    /// May publish a local audio track.
    pub publish_audio: bool,
}

impl Permissions {
    /// No permissions at all.
    pub const NONE: Self = Self {
        change_role: false,
        mute: false,
        unmute: false,
        remove_others: false,
        end_room: false,
        publish_audio: false,
    };

    /// Every permission granted.
    pub const ALL: Self = Self {
        change_role: true,
        mute: true,
        unmute: true,
        remove_others: true,
        end_room: true,
        publish_audio: true,
    };
}

/// A role resolved for a peer: its name and what it may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role name.
    pub name: RoleName,
    /// Granted permissions.
    pub permissions: Permissions,
}

impl Role {
    /// Create a role from its parts.
    pub fn new(name: RoleName, permissions: Permissions) -> Self {
        Self { name, permissions }
    }

    /// Whether this is the listener role.
    pub fn is_listener(&self) -> bool {
        self.name == RoleName::Listener
    }

    /// Whether this is the speaker role.
    pub fn is_speaker(&self) -> bool {
        self.name == RoleName::Speaker
    }
}

/// Default permission flags per role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCapabilityTable {
    roles: BTreeMap<RoleName, Permissions>,
}

impl Default for RoleCapabilityTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RoleCapabilityTable {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self { roles: BTreeMap::new() }
    }

    /// The built-in listener/speaker/moderator table.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.insert(RoleName::Listener, Permissions::NONE);
        table.insert(RoleName::Speaker, Permissions { publish_audio: true, ..Permissions::NONE });
        table.insert(RoleName::Moderator, Permissions::ALL);
        table
    }

    /// Add or replace a role's permissions.
    pub fn insert(&mut self, name: RoleName, permissions: Permissions) {
        self.roles.insert(name, permissions);
    }

    /// Permissions for a role. `None` if the role is unknown.
    pub fn permissions(&self, name: &RoleName) -> Option<Permissions> {
        self.roles.get(name).copied()
    }

    /// Resolve a role by name. `None` if the role is unknown.
    pub fn role(&self, name: &RoleName) -> Option<Role> {
        self.permissions(name).map(|permissions| Role::new(name.clone(), permissions))
    }

    /// Whether the table knows this role.
    pub fn contains(&self, name: &RoleName) -> bool {
        self.roles.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("LISTENER".parse::<RoleName>(), Ok(RoleName::Listener));
        assert_eq!(" Speaker ".parse::<RoleName>(), Ok(RoleName::Speaker));
        assert_eq!("moderator".parse::<RoleName>(), Ok(RoleName::Moderator));
        assert_eq!("host".parse::<RoleName>(), Ok(RoleName::Other("host".into())));
    }

    #[test]
    fn standard_table_grants_change_role_to_moderator_only() {
        let table = RoleCapabilityTable::standard();

        for name in RoleName::BUILTIN {
            let role = table.role(&name);
            let can_change = role.map(|r| r.permissions.change_role);
            assert_eq!(can_change, Some(name == RoleName::Moderator), "{name}");
        }
    }

    #[test]
    fn listener_never_publishes() {
        let table = RoleCapabilityTable::standard();
        assert_eq!(table.permissions(&RoleName::Listener), Some(Permissions::NONE));
    }

    #[test]
    fn unknown_role_has_no_entry() {
        let table = RoleCapabilityTable::standard();
        assert!(table.role(&RoleName::Other("host".into())).is_none());
    }

    proptest! {
        #[test]
        fn prop_display_roundtrips(name in "[a-zA-Z]{1,12}") {
            let role: RoleName = name.clone().into();
            let back: RoleName = role.to_string().into();
            prop_assert_eq!(role, back);
        }
    }
}
