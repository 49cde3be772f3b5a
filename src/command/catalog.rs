use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::traits::input::ButtonId;
use crate::util::error::ConfigError;

/// What performing a command does.
///
/// `Move` is handled by the session itself. Everything else is passed back
/// to the caller by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CommandAction {
    Move,
    Custom(String),
}

impl CommandAction {
    pub fn name(&self) -> &str {
        match self {
            Self::Move => "move",
            Self::Custom(name) => name,
        }
    }
}

impl From<String> for CommandAction {
    fn from(name: String) -> Self {
        if name.eq_ignore_ascii_case("move") {
            Self::Move
        } else {
            Self::Custom(name)
        }
    }
}

impl From<&str> for CommandAction {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<CommandAction> for String {
    fn from(action: CommandAction) -> Self {
        match action {
            CommandAction::Move => "move".to_string(),
            CommandAction::Custom(name) => name,
        }
    }
}

/// A named button sequence and the action it triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    #[serde(alias = "action_name")]
    pub action: CommandAction,
    pub keys: Vec<ButtonId>,
}

impl Command {
    pub fn new(name: impl Into<String>, action: impl Into<CommandAction>, keys: &[ButtonId]) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            keys: keys.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether `prefix` matches the leading keys of this command.
    pub fn starts_with(&self, prefix: &[ButtonId]) -> bool {
        self.keys.starts_with(prefix)
    }
}

/// Built-in catalog used when no configuration provides one.
pub fn default_commands() -> Vec<Command> {
    vec![
        Command::new("march", "move", &[1, 1, 1, 2]),
        Command::new("attack", "attack", &[2, 2, 1, 2]),
        Command::new("defend", "defend", &[3, 3, 1, 2]),
        Command::new("retreat", "retreat", &[4, 4, 3, 2]),
    ]
}

/// Validated, ordered command list. Immutable for the life of a session.
///
/// Declaration order is significant: it breaks ties when more than one
/// command matches.
#[derive(Debug, Clone)]
pub struct CommandCatalog {
    commands: Vec<Command>,
    button_count: u8,
    max_len: usize,
}

impl CommandCatalog {
    pub fn new(commands: Vec<Command>, button_count: u8) -> Result<Self, ConfigError> {
        if commands.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some(command) = commands.iter().find(|c| c.keys.is_empty()) {
            return Err(ConfigError::EmptyCommandKeys {
                name: command.name.clone(),
            });
        }
        check_buttons(&commands, button_count)?;
        warn_ambiguous(&commands);

        let max_len = commands.iter().map(Command::len).max().unwrap_or(0);
        Ok(Self {
            commands,
            button_count,
            max_len,
        })
    }

    pub fn with_defaults(button_count: u8) -> Result<Self, ConfigError> {
        Self::new(default_commands(), button_count)
    }

    /// Whether every key is playable with `button_count` buttons.
    pub fn check_buttons(&self, button_count: u8) -> Result<(), ConfigError> {
        check_buttons(&self.commands, button_count)
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn button_count(&self) -> u8 {
        self.button_count
    }

    /// Length of the longest command.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// First declared command whose keys equal `keys` exactly.
    pub fn find_exact(&self, keys: &[ButtonId]) -> Option<&Command> {
        self.commands.iter().find(|c| c.keys == keys)
    }

    /// Uniform random pick, used to draw Simon patterns.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &Command {
        &self.commands[rng.gen_range(0..self.commands.len())]
    }
}

fn check_buttons(commands: &[Command], button_count: u8) -> Result<(), ConfigError> {
    for command in commands {
        if let Some(&button) = command
            .keys
            .iter()
            .find(|&&b| b == 0 || b > button_count)
        {
            return Err(ConfigError::ButtonOutOfRange {
                name: command.name.clone(),
                button,
                max: button_count,
            });
        }
    }
    Ok(())
}

// Overlaps load fine; the first declared command wins at match time.
fn warn_ambiguous(commands: &[Command]) {
    for (i, a) in commands.iter().enumerate() {
        for b in &commands[i + 1..] {
            if a.keys == b.keys {
                log::warn!(
                    "commands `{}` and `{}` share keys {:?}; `{}` always wins",
                    a.name,
                    b.name,
                    a.keys,
                    a.name
                );
            } else if b.starts_with(&a.keys) || a.starts_with(&b.keys) {
                let (short, long) = if a.len() < b.len() { (a, b) } else { (b, a) };
                log::warn!(
                    "command `{}` is a prefix of `{}`; catalog is not prefix-unambiguous",
                    short.name,
                    long.name
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = CommandCatalog::with_defaults(4).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.max_len(), 4);
        assert_eq!(catalog.get("march").unwrap().action, CommandAction::Move);
    }

    #[test]
    fn rejects_empty_catalog() {
        assert_eq!(
            CommandCatalog::new(Vec::new(), 4).unwrap_err(),
            ConfigError::EmptyCatalog
        );
    }

    #[test]
    fn rejects_empty_keys() {
        let err = CommandCatalog::new(vec![Command::new("hush", "move", &[])], 4).unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyCommandKeys {
                name: "hush".to_string()
            }
        );
    }

    #[test]
    fn rejects_out_of_range_buttons() {
        let err = CommandCatalog::new(vec![Command::new("wide", "move", &[1, 5])], 4).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ButtonOutOfRange {
                name: "wide".to_string(),
                button: 5,
                max: 4
            }
        );
        assert!(CommandCatalog::new(vec![Command::new("zero", "move", &[0])], 4).is_err());
    }

    #[test]
    fn find_exact_prefers_first_declared() {
        let catalog = CommandCatalog::new(
            vec![
                Command::new("first", "move", &[1, 2]),
                Command::new("second", "attack", &[1, 2]),
            ],
            4,
        )
        .unwrap();
        assert_eq!(catalog.find_exact(&[1, 2]).unwrap().name, "first");
        assert!(catalog.find_exact(&[2, 1]).is_none());
    }

    #[test]
    fn choose_is_deterministic_for_a_seed() {
        let catalog = CommandCatalog::with_defaults(4).unwrap();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(catalog.choose(&mut a).name, catalog.choose(&mut b).name);
        }
    }

    #[test]
    fn action_round_trips_through_json() {
        let json = r#"{"name":"march","action":"move","keys":[1,1,1,2]}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(command.action, CommandAction::Move);

        let json = r#"{"name":"dance","action_name":"dance","keys":[4]}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(command.action, CommandAction::Custom("dance".to_string()));
        let back = serde_json::to_string(&command).unwrap();
        assert!(back.contains(r#""action":"dance""#));
    }
}
