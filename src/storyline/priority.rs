//! Priority passing.
//!
//! The active player receives priority whenever the storyline is empty.
//! Passing hands it to the other player; once both have passed in a row
//! the current step is over. Any action resets the count.

use serde::{Deserialize, Serialize};

use crate::core::{IllegalAction, PlayerId, PLAYER_COUNT};

/// Who may act next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    holder: PlayerId,
    active: PlayerId,
    consecutive_passes: usize,
}

impl Priority {
    /// Priority for a new step, starting with the active player.
    #[must_use]
    pub fn new(active: PlayerId) -> Self {
        Self {
            holder: active,
            active,
            consecutive_passes: 0,
        }
    }

    #[must_use]
    pub fn holder(&self) -> PlayerId {
        self.holder
    }

    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    /// The holder passes. Returns `true` when both players have now passed.
    pub fn pass(&mut self, player: PlayerId) -> Result<bool, IllegalAction> {
        if player != self.holder {
            return Err(IllegalAction::NotYourPriority(player));
        }
        self.consecutive_passes += 1;
        if self.consecutive_passes >= PLAYER_COUNT {
            return Ok(true);
        }
        self.holder = self.holder.opponent();
        Ok(false)
    }

    /// Someone acted. Priority returns to the active player.
    pub fn acted(&mut self) {
        self.consecutive_passes = 0;
        self.holder = self.active;
    }
}
