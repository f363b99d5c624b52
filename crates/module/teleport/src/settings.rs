use serde::{Deserialize, Serialize};
use tweaks_host::Sound;

/// Settings read from the `teleport` section of the configuration.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportSettings {
    /// Played where an anchor is placed
    pub anchor_placed_sound: Sound,
    /// Sent to the player who placed an anchor. Empty sends nothing.
    pub anchor_placed_message: String,
}

impl Default for TeleportSettings {
    fn default() -> Self {
        Self {
            anchor_placed_sound: Sound::new("block.respawn_anchor.set_spawn"),
            anchor_placed_message: "<gold>FD<dark_gray> » <gray>Teleport created. \
                                    Press <gold>RMB<gray> on the block to open the teleport menu."
                .to_owned(),
        }
    }
}
