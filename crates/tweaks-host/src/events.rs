//! Host events delivered to modules.
//!
//! Each event carries immutable facts about the occurrence plus a few
//! overridable outcome fields. The host fills every field before dispatch and
//! reads the outcome fields after dispatch returns. Field docs name which
//! listeners may write a field; everything else is read-only by convention.

use tweaks_event::Cancellable;

use crate::block::Material;
use crate::world::{BlockPos, Location, PlayerId};

macro_rules! impl_cancellable {
    ($($event:ty),* $(,)?) => {
        $(
            impl Cancellable for $event {
                fn is_cancelled(&self) -> bool {
                    self.cancelled
                }

                fn set_cancelled(&mut self, cancelled: bool) {
                    self.cancelled = cancelled;
                }
            }
        )*
    };
}

impl_cancellable!(
    SpawnSetEvent,
    BlockInteractEvent,
    BedEnterEvent,
    BlockPlaceEvent
);

/// Why a player's spawn point is about to change.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SpawnCause {
    /// Set by server code (a module or command), not by gameplay.
    Programmatic,
    /// Set by the player, e.g. sleeping in a bed or using an anchor.
    PlayerAction,
    Other,
}

/// A player's spawn point is about to be set.
#[derive(Clone, PartialEq, Debug)]
pub struct SpawnSetEvent {
    pub player: PlayerId,
    /// New spawn point, `None` when clearing.
    pub location: Option<Location>,
    pub cause: SpawnCause,
    /// Written by spawn guards only.
    pub cancelled: bool,
}

impl SpawnSetEvent {
    pub const fn new(player: PlayerId, location: Option<Location>, cause: SpawnCause) -> Self {
        Self {
            player,
            location,
            cause,
            cancelled: false,
        }
    }
}

/// A dead player is about to respawn.
#[derive(Clone, PartialEq, Debug)]
pub struct PlayerRespawnEvent {
    pub player: PlayerId,
    /// Where the player is at dispatch time; its world picks the canonical spawn.
    pub player_location: Location,
    /// Where the host will respawn the player. Written by respawn redirectors.
    pub respawn_location: Location,
}

impl PlayerRespawnEvent {
    pub const fn new(
        player: PlayerId,
        player_location: Location,
        respawn_location: Location,
    ) -> Self {
        Self {
            player,
            player_location,
            respawn_location,
        }
    }
}

/// How the player interacted.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum InteractAction {
    LeftClickBlock,
    RightClickBlock,
    LeftClickAir,
    RightClickAir,
    /// Stepping on a pressure plate, trampling farmland, ...
    Physical,
}

/// Snapshot of the block a player clicked.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ClickedBlock {
    pub pos: BlockPos,
    pub material: Material,
}

/// A player interacted with a block or with the air.
#[derive(Clone, PartialEq, Debug)]
pub struct BlockInteractEvent {
    pub player: PlayerId,
    pub action: InteractAction,
    pub clicked: Option<ClickedBlock>,
    /// Item in the interacting hand, `None` for an empty hand.
    pub item: Option<Material>,
    pub sneaking: bool,
    /// Written by interaction overrides.
    pub cancelled: bool,
}

impl BlockInteractEvent {
    pub const fn new(
        player: PlayerId,
        action: InteractAction,
        clicked: Option<ClickedBlock>,
    ) -> Self {
        Self {
            player,
            action,
            clicked,
            item: None,
            sneaking: false,
            cancelled: false,
        }
    }

    #[must_use]
    pub const fn with_item(mut self, item: Material) -> Self {
        self.item = Some(item);
        self
    }

    #[must_use]
    pub const fn sneaking(mut self, sneaking: bool) -> Self {
        self.sneaking = sneaking;
        self
    }

    /// Whether the player interacted with nothing in hand.
    pub fn is_empty_handed(&self) -> bool {
        self.item.is_none_or(Material::is_air)
    }
}

/// A player is about to enter a bed.
#[derive(Clone, PartialEq, Debug)]
pub struct BedEnterEvent {
    pub player: PlayerId,
    pub bed: BlockPos,
    pub cancelled: bool,
}

impl BedEnterEvent {
    pub const fn new(player: PlayerId, bed: BlockPos) -> Self {
        Self {
            player,
            bed,
            cancelled: false,
        }
    }
}

/// A player placed a block.
///
/// The block is already in world storage with its default data when this is
/// dispatched; cancelling reverts the placement.
#[derive(Clone, PartialEq, Debug)]
pub struct BlockPlaceEvent {
    pub player: PlayerId,
    pub placed: BlockPos,
    pub material: Material,
    /// Result of the host's build-permission check for this placement.
    pub can_build: bool,
    pub cancelled: bool,
}

impl BlockPlaceEvent {
    pub const fn new(player: PlayerId, placed: BlockPos, material: Material) -> Self {
        Self {
            player,
            placed,
            material,
            can_build: true,
            cancelled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldId;

    fn anchor_click(action: InteractAction) -> BlockInteractEvent {
        BlockInteractEvent::new(
            PlayerId::random(),
            action,
            Some(ClickedBlock {
                pos: BlockPos::new(WorldId::OVERWORLD, 0, 64, 0),
                material: Material::RespawnAnchor,
            }),
        )
    }

    #[test]
    fn empty_hand_is_none_or_air() {
        let event = anchor_click(InteractAction::LeftClickBlock);
        assert!(event.is_empty_handed());
        assert!(event.clone().with_item(Material::Air).is_empty_handed());
        assert!(!event.with_item(Material::Glowstone).is_empty_handed());
    }

    #[test]
    fn events_start_uncancelled() {
        let player = PlayerId::random();
        let pos = BlockPos::new(WorldId::OVERWORLD, 1, 2, 3);

        let spawn = SpawnSetEvent::new(player, None, SpawnCause::Other);
        let click = anchor_click(InteractAction::RightClickBlock);
        let place = BlockPlaceEvent::new(player, pos, Material::Stone);

        assert!(!spawn.is_cancelled());
        assert!(!click.is_cancelled());
        assert!(!BedEnterEvent::new(player, pos).is_cancelled());
        assert!(!place.is_cancelled());
    }

    #[test]
    fn place_event_defaults_to_buildable() {
        let event = BlockPlaceEvent::new(
            PlayerId::random(),
            BlockPos::default(),
            Material::RespawnAnchor,
        );
        assert!(event.can_build);
    }
}
