//! UI commands and the phase transition table

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};
use crate::error::CommandError;
use crate::upgrades::UpgradeKind;

/// Menu/hangar/overlay actions raised by the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Launch from the menu or the hangar
    Start,
    /// Back to wave 1 after being shot down
    Retry,
    /// Continue after a cleared wave
    NextWave,
    OpenHangar,
    ReturnToMenu,
    Purchase(UpgradeKind),
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Retry => "retry",
            Command::NextWave => "next_wave",
            Command::OpenHangar => "open_hangar",
            Command::ReturnToMenu => "return_to_menu",
            Command::Purchase(_) => "purchase",
        }
    }
}

impl GameState {
    /// Apply a UI command. Rejected commands leave the state untouched.
    pub fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        use GamePhase::*;

        match (self.phase, command) {
            (Menu | Hangar, Command::Start) => {
                if self.wave_cleared {
                    self.wave.wave += 1;
                }
                self.reset_arena();
                self.begin_wave();
            }
            (Menu | WaveComplete | GameOver, Command::OpenHangar) => {
                self.phase = Hangar;
            }
            (Hangar | GameOver, Command::ReturnToMenu) => {
                self.phase = Menu;
            }
            (WaveComplete, Command::NextWave) => {
                self.wave.wave += 1;
                self.begin_wave();
            }
            (GameOver, Command::Retry) => {
                self.wave.wave = 1;
                self.kills = 0;
                self.reset_arena();
                self.begin_wave();
            }
            (Hangar, Command::Purchase(kind)) => self.purchase(kind)?,
            (phase, command) => {
                return Err(CommandError::InvalidTransition {
                    command: command.as_str(),
                    phase,
                });
            }
        }

        log::info!("{} -> {:?}", command.as_str(), self.phase);
        Ok(())
    }

    fn purchase(&mut self, kind: UpgradeKind) -> Result<(), CommandError> {
        let cost = self.upgrades.next_cost(kind);
        let Some(level) = self.upgrades.purchase(kind, &mut self.credits) else {
            return Err(CommandError::InsufficientCredits {
                kind,
                cost,
                available: self.credits,
            });
        };
        self.player.apply_stats(&self.upgrades.player_stats());
        log::info!(
            "Bought {} level {} for {} ({} credits left)",
            kind.as_str(),
            level,
            cost,
            self.credits
        );
        self.emit(GameEvent::Upgrade { kind, level });
        Ok(())
    }
}
