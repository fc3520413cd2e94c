//! Errors surfaced at the UI command boundary

use thiserror::Error;

use crate::sim::GamePhase;
use crate::upgrades::UpgradeKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("command {command} is not valid in phase {phase:?}")]
    InvalidTransition {
        command: &'static str,
        phase: GamePhase,
    },
    #[error("{} upgrade costs {cost} credits, only {available} available", kind.as_str())]
    InsufficientCredits {
        kind: UpgradeKind,
        cost: u32,
        available: u32,
    },
}
