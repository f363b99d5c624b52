//! Host bindings for tweaks modules
//!
//! The game server owns the world, the players and the event stream. This
//! crate is the vocabulary modules use to talk about them:
//!
//! - [`world`] - worlds, players, locations, block positions and sounds
//! - [`block`] - materials and block data, including respawn-anchor charges
//! - [`events`] - the host events modules subscribe to
//! - [`services`] - the [`HostServices`] and [`TeleportMenu`] collaborator traits
//! - [`memory`] - an in-memory host for the runner and for tests

pub mod block;
pub mod error;
pub mod events;
pub mod memory;
pub mod services;
pub mod world;

pub use block::{BlockData, Material, RespawnAnchor};
pub use error::{HostError, HostResult};
pub use events::{
    BedEnterEvent, BlockInteractEvent, BlockPlaceEvent, ClickedBlock, InteractAction,
    PlayerRespawnEvent, SpawnCause, SpawnSetEvent,
};
pub use memory::MemoryHost;
pub use services::{HostServices, TeleportMenu};
pub use world::{BlockPos, Location, PlayerId, Sound, WorldId};
