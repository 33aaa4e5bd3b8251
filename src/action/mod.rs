mod game;
mod home;

use serde::{Deserialize, Serialize};
use strum::Display;

pub use crate::action::game::GameAction;
pub use crate::action::home::HomeAction;

/// Where in a key's press/repeat/release cycle an action fired. Plain
/// "click" bindings always carry the default `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, Deserialize, Default)]
pub enum ActionState {
    #[default]
    Start,
    Repeat,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Command {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Refresh,
    Error(String),
    ToggleShowHelp,
    StartGame,
    ShowHome,
    // Page commands
    Home(HomeAction),
    Game(GameAction),
}

impl Command {
    /// Short label used by the help overlay; page commands collapse to the
    /// inner action name.
    pub fn string(&self) -> String {
        match self {
            Command::Home(action) => serde_plain::to_string(action).unwrap_or_else(|_| action.to_string()),
            Command::Game(action) => serde_plain::to_string(action).unwrap_or_else(|_| action.to_string()),
            _ => serde_plain::to_string(self).unwrap_or_else(|_| self.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub command: Command,
    pub state: ActionState,
}

#[macro_export]
macro_rules! act {
    ($command:expr) => {
        $crate::action::Action { command: $command, state: $crate::action::ActionState::default() }
    };
    ($command:expr, $state:expr) => {
        $crate::action::Action { command: $command, state: $state }
    };
}

pub use act;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_from_plain_string() {
        let command: Command = serde_yaml::from_str("Quit").unwrap();
        assert_eq!(command, Command::Quit);
    }

    #[test]
    fn test_command_string() {
        assert_eq!(Command::ToggleShowHelp.string(), "ToggleShowHelp");
        assert_eq!(Command::Game(GameAction::Flap).string(), "Flap");
    }

    #[test]
    fn test_action_round_trip() {
        let action = act!(Command::Game(GameAction::Flap), ActionState::End);
        let encoded = serde_json::to_string(&action).unwrap();
        let decoded: Action = serde_json::from_str(&encoded).unwrap();
        assert_eq!(action, decoded);
    }
}
