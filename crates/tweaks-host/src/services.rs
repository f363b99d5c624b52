//! Services the host exposes to modules.

use crate::block::BlockData;
use crate::error::HostResult;
use crate::world::{BlockPos, Location, PlayerId, Sound, WorldId};

/// World and player services provided by the host.
///
/// Every call is made from the host's dispatch thread while an event is being
/// handled, so implementations must return promptly and never block.
pub trait HostServices: Send + Sync {
    /// Canonical spawn location of a world, `None` if the world has none set.
    fn spawn_location(&self, world: WorldId) -> Option<Location>;

    /// Current data of the block at `pos`.
    fn block_data(&self, pos: BlockPos) -> Option<BlockData>;

    /// Read-modify-write the data of the block at `pos`.
    ///
    /// `update` sees the freshest stored value and returns whether it changed
    /// anything worth writing back. No other write to the same block can
    /// happen between the read and the write. Returns what `update` returned.
    fn update_block_data(
        &self,
        pos: BlockPos,
        update: &mut dyn FnMut(&mut BlockData) -> bool,
    ) -> HostResult<bool>;

    /// Send a formatted chat message. Ignored if the player is offline.
    fn send_message(&self, player: PlayerId, message: &str);

    /// Play a sound to everyone near `at`.
    fn play_sound(&self, at: Location, sound: &Sound);
}

/// The custom teleport menu, rendered elsewhere.
pub trait TeleportMenu: Send + Sync {
    /// Open the menu for `player`, who used the anchor at `anchor`.
    fn open(&self, player: PlayerId, anchor: BlockPos);
}
