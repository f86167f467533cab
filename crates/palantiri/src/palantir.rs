//! The palantir handle type.
//!
//! A palantir is opaque to the pool: it carries an identity and nothing
//! else. Identity is what matters; equality, hashing, and release
//! recognition all go through the id.

use serde::{Deserialize, Serialize};

/// Unique identifier for a palantir.
///
/// UUID v4 avoids confusion with pool indices and prevents accidental
/// collision between handles minted by different callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PalantirId(uuid::Uuid);

impl PalantirId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        let uuid = uuid::Uuid::parse_str(s)?;
        Ok(Self(uuid))
    }
}

impl Default for PalantirId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PalantirId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque, immutable resource handle drawn from a [`PalantiriPool`].
///
/// Exclusively usable by one holder at a time. The pool neither creates
/// nor destroys palantiri; callers mint them and hand the full set to
/// the pool at construction.
///
/// [`PalantiriPool`]: crate::PalantiriPool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palantir {
    id: PalantirId,
}

impl Palantir {
    /// Mint a palantir with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: PalantirId::new(),
        }
    }

    /// Mint a palantir with a known identity.
    pub fn with_id(id: PalantirId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> PalantirId {
        self.id
    }
}

impl Default for Palantir {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Palantir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
