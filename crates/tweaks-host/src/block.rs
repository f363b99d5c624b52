//! Materials and block data.

use serde::{Deserialize, Serialize};

use crate::error::{HostError, HostResult};

/// Block and item materials the modules care about.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Air,
    Stone,
    Glowstone,
    RespawnAnchor,
    RedBed,
    EnderPearl,
}

impl Material {
    /// Whether holding this counts as an empty hand.
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }
}

/// Block data of a respawn anchor.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct RespawnAnchor {
    charges: u8,
    maximum_charges: u8,
}

impl RespawnAnchor {
    pub const DEFAULT_MAXIMUM_CHARGES: u8 = 4;

    /// Empty anchor with the vanilla maximum.
    pub const fn empty() -> Self {
        Self {
            charges: 0,
            maximum_charges: Self::DEFAULT_MAXIMUM_CHARGES,
        }
    }

    pub fn with_charges(charges: u8) -> HostResult<Self> {
        let mut anchor = Self::empty();
        anchor.set_charges(charges)?;
        Ok(anchor)
    }

    pub const fn charges(&self) -> u8 {
        self.charges
    }

    pub const fn maximum_charges(&self) -> u8 {
        self.maximum_charges
    }

    pub const fn is_fully_charged(&self) -> bool {
        self.charges == self.maximum_charges
    }

    pub fn set_charges(&mut self, charges: u8) -> HostResult<()> {
        if charges > self.maximum_charges {
            return Err(HostError::InvalidCharges {
                charges,
                maximum: self.maximum_charges,
            });
        }
        self.charges = charges;
        Ok(())
    }

    pub fn charge_fully(&mut self) {
        self.charges = self.maximum_charges;
    }
}

impl Default for RespawnAnchor {
    fn default() -> Self {
        Self::empty()
    }
}

/// Material-specific data stored for a block.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum BlockData {
    RespawnAnchor(RespawnAnchor),
    Simple(Material),
}

impl BlockData {
    pub const fn material(&self) -> Material {
        match self {
            Self::RespawnAnchor(_) => Material::RespawnAnchor,
            Self::Simple(material) => *material,
        }
    }

    pub const fn as_respawn_anchor(&self) -> Option<&RespawnAnchor> {
        match self {
            Self::RespawnAnchor(anchor) => Some(anchor),
            Self::Simple(_) => None,
        }
    }

    pub fn as_respawn_anchor_mut(&mut self) -> Option<&mut RespawnAnchor> {
        match self {
            Self::RespawnAnchor(anchor) => Some(anchor),
            Self::Simple(_) => None,
        }
    }
}

impl From<Material> for BlockData {
    /// Default block data for a freshly placed block of `material`.
    fn from(material: Material) -> Self {
        match material {
            Material::RespawnAnchor => Self::RespawnAnchor(RespawnAnchor::empty()),
            other => Self::Simple(other),
        }
    }
}
