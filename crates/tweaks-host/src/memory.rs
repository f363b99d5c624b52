//! In-memory host.
//!
//! Stores spawn points and block data in maps and records every message,
//! sound and menu opening, so the runner has something to drive and tests
//! can assert on side effects.

use hashbrown::{HashMap, HashSet};
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::block::BlockData;
use crate::error::{HostError, HostResult};
use crate::services::{HostServices, TeleportMenu};
use crate::world::{BlockPos, Location, PlayerId, Sound, WorldId};

/// A message delivered to an online player.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SentMessage {
    pub player: PlayerId,
    pub text: String,
}

/// A sound played in a world.
#[derive(Clone, PartialEq, Debug)]
pub struct PlayedSound {
    pub at: Location,
    pub sound: Sound,
}

/// A teleport menu opened for a player.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct MenuOpening {
    pub player: PlayerId,
    pub anchor: BlockPos,
}

#[derive(Default)]
struct MemoryHostInner {
    spawns: HashMap<WorldId, Location>,
    blocks: HashMap<BlockPos, BlockData>,
    online: HashSet<PlayerId>,
    messages: Vec<SentMessage>,
    sounds: Vec<PlayedSound>,
    menus: Vec<MenuOpening>,
}

/// In-memory [`HostServices`] and [`TeleportMenu`].
#[derive(Default)]
pub struct MemoryHost {
    inner: Mutex<MemoryHostInner>,
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_spawn_location(&self, location: Location) {
        debug!("Spawn of world {:?} set to {:?}", location.world, location);
        self.inner.lock().spawns.insert(location.world, location);
    }

    pub fn clear_spawn_location(&self, world: WorldId) -> HostResult<()> {
        self.inner
            .lock()
            .spawns
            .remove(&world)
            .map(|_| ())
            .ok_or(HostError::UnknownWorld(world))
    }

    pub fn set_block(&self, pos: BlockPos, data: impl Into<BlockData>) {
        self.inner.lock().blocks.insert(pos, data.into());
    }

    pub fn join(&self, player: PlayerId) {
        self.inner.lock().online.insert(player);
    }

    pub fn quit(&self, player: PlayerId) {
        self.inner.lock().online.remove(&player);
    }

    pub fn messages(&self) -> Vec<SentMessage> {
        self.inner.lock().messages.clone()
    }

    pub fn sounds(&self) -> Vec<PlayedSound> {
        self.inner.lock().sounds.clone()
    }

    pub fn menus(&self) -> Vec<MenuOpening> {
        self.inner.lock().menus.clone()
    }

    /// Forget recorded messages, sounds and menu openings.
    pub fn clear_records(&self) {
        let mut inner = self.inner.lock();
        inner.messages.clear();
        inner.sounds.clear();
        inner.menus.clear();
    }
}

impl HostServices for MemoryHost {
    fn spawn_location(&self, world: WorldId) -> Option<Location> {
        self.inner.lock().spawns.get(&world).copied()
    }

    fn block_data(&self, pos: BlockPos) -> Option<BlockData> {
        self.inner.lock().blocks.get(&pos).copied()
    }

    fn update_block_data(
        &self,
        pos: BlockPos,
        update: &mut dyn FnMut(&mut BlockData) -> bool,
    ) -> HostResult<bool> {
        // The lock is held across read, update and write.
        let mut inner = self.inner.lock();
        let stored = inner
            .blocks
            .get_mut(&pos)
            .ok_or(HostError::UnknownBlock(pos))?;

        let mut data = *stored;
        let changed = update(&mut data);
        if changed {
            *stored = data;
        }

        Ok(changed)
    }

    fn send_message(&self, player: PlayerId, message: &str) {
        let mut inner = self.inner.lock();
        if !inner.online.contains(&player) {
            trace!("Dropping message for offline player {}", player);
            return;
        }

        inner.messages.push(SentMessage {
            player,
            text: message.to_owned(),
        });
    }

    fn play_sound(&self, at: Location, sound: &Sound) {
        self.inner.lock().sounds.push(PlayedSound {
            at,
            sound: sound.clone(),
        });
    }
}

impl TeleportMenu for MemoryHost {
    fn open(&self, player: PlayerId, anchor: BlockPos) {
        debug!("Opening teleport menu for {} at {}", player, anchor);
        self.inner.lock().menus.push(MenuOpening { player, anchor });
    }
}
