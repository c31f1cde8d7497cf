//! Actors and roles
//!
//! The engine never authenticates. It receives an already-authenticated
//! [`Actor`] from the surrounding service and authorizes purely against
//! the role's position in a strict ordering.

use serde::{Deserialize, Serialize};

/// Unique identifier for an actor (reviewer, editor, administrator)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl ActorId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        let mut end = self.0.len().min(8);
        while !self.0.is_char_boundary(end) {
            end -= 1;
        }
        &self.0[..end]
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editorial role, strictly ordered: `Reviewer < Admin < SuperAdmin`.
///
/// The derived `Ord` is the authorization check: an actor may take a
/// transition when their role is >= the edge's minimum role. No string
/// matching, no runtime reflection.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Researches claims and drafts fact-checks
    #[default]
    Reviewer,
    /// Edits, approves, and publishes
    Admin,
    /// Full control, including unpublishing
    SuperAdmin,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Reviewer => "reviewer",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An authenticated actor, supplied by the external auth collaborator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: ActorId::new(id),
            role,
        }
    }

    pub fn reviewer(id: impl Into<String>) -> Self {
        Self::new(id, Role::Reviewer)
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn super_admin(id: impl Into<String>) -> Self {
        Self::new(id, Role::SuperAdmin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Reviewer < Role::Admin);
        assert!(Role::Admin < Role::SuperAdmin);
        assert!(Role::SuperAdmin >= Role::Reviewer);
    }

    #[test]
    fn test_role_serde_names() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");
        let back: Role = serde_json::from_str("\"reviewer\"").unwrap();
        assert_eq!(back, Role::Reviewer);
    }

    #[test]
    fn test_actor_constructors() {
        let actor = Actor::admin("ed-1");
        assert_eq!(actor.id, ActorId::new("ed-1"));
        assert_eq!(actor.role, Role::Admin);
        assert_eq!(Actor::super_admin("root").role, Role::SuperAdmin);
    }

    #[test]
    fn test_actor_id_short() {
        let id = ActorId::generate();
        assert!(id.short().len() <= 8);
        assert_eq!(ActorId::new("ab").short(), "ab");
    }

    #[test]
    fn test_actor_id_short_clamps_to_char_boundary() {
        // Byte 8 falls inside the two-byte 'é'; clamp, don't panic
        assert_eq!(ActorId::new("editor-é-un").short(), "editor-");
        assert_eq!(ActorId::new("rédaction-fr").short(), "rédacti");
        assert_eq!(ActorId::new("éditeur").short(), "éditeur");
    }
}
