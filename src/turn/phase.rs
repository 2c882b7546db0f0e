//! Phases and game results.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Turn phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Opening hands and mulligans, before turn 1.
    #[default]
    Setup,
    /// Untap, refill resources, start-of-turn triggers, draw.
    Start,
    /// Players take actions.
    Main,
    /// End-of-turn triggers and cleanup.
    End,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Main => "main",
            Self::End => "end",
        };
        f.write_str(name)
    }
}

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    /// Both players lost at once.
    Draw,
    /// Torn down by the host.
    Aborted,
}
