use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Serialize, Deserialize)]
pub struct WorldId(pub u32);

impl WorldId {
    pub const OVERWORLD: Self = Self(0);
    pub const NETHER: Self = Self(1);
    pub const END: Self = Self(2);
}

#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A point in a world, with facing.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Location {
    pub world: WorldId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    pub const fn new(world: WorldId, x: f64, y: f64, z: f64) -> Self {
        Self {
            world,
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub const fn with_rotation(self, yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch, ..self }
    }
}

#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub world: WorldId,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(world: WorldId, x: i32, y: i32, z: i32) -> Self {
        Self { world, x, y, z }
    }

    /// The block's minimum corner as a location.
    pub const fn to_location(self) -> Location {
        Location::new(self.world, self.x as f64, self.y as f64, self.z as f64)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@({}, {}, {})", self.world.0, self.x, self.y, self.z)
    }
}

/// Namespaced sound key, e.g. `block.respawn_anchor.set_spawn`.
#[derive(Clone, Hash, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sound(pub String);

impl Sound {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
