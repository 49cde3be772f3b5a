use super::catalog::{Command, CommandCatalog};
use crate::traits::input::ButtonId;

/// Buttons accepted so far toward a freeplay command.
///
/// Only [`CommandMatcher`] appends to it, so the string is always empty or
/// a prefix of at least one catalog command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandString {
    keys: Vec<ButtonId>,
}

impl CommandString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[ButtonId] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Pure result of [`CommandMatcher::try_extend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub accepted: bool,
    /// The string after the press: extended when accepted, empty when rejected.
    pub keys: Vec<ButtonId>,
}

/// What a freeplay press did to the command string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// No command continues with this button. The string was cleared.
    Rejected,
    /// The button was appended; more keys are needed.
    Extended,
    /// The string spelled out this command. The string was cleared.
    Completed(Command),
    /// Full length reached without an exact match. The string was cleared.
    Unrecognized(Vec<ButtonId>),
}

/// Prefix matcher recognizing catalog commands one press at a time.
#[derive(Debug, Clone)]
pub struct CommandMatcher {
    catalog: CommandCatalog,
}

impl CommandMatcher {
    pub fn new(catalog: CommandCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CommandCatalog {
        &self.catalog
    }

    /// Whether some command starts with `prefix` followed by `button`.
    pub fn accepts(&self, prefix: &[ButtonId], button: ButtonId) -> bool {
        let at = prefix.len();
        self.catalog
            .commands()
            .iter()
            .any(|c| c.keys.len() > at && c.starts_with(prefix) && c.keys[at] == button)
    }

    /// Side-effect free form of [`feed`](Self::feed).
    pub fn try_extend(&self, current: &[ButtonId], button: ButtonId) -> Extension {
        if self.accepts(current, button) {
            let mut keys = current.to_vec();
            keys.push(button);
            Extension {
                accepted: true,
                keys,
            }
        } else {
            Extension {
                accepted: false,
                keys: Vec::new(),
            }
        }
    }

    /// Apply one press to `string`.
    ///
    /// Completion happens at the catalog's maximum command length, or
    /// earlier once the string equals a command that no longer command extends.
    /// The first declared exact match wins.
    pub fn feed(&self, string: &mut CommandString, button: ButtonId) -> MatchOutcome {
        if !self.accepts(string.as_slice(), button) {
            log::debug!(
                "button {} does not continue {:?}; clearing command string",
                button,
                string.as_slice()
            );
            string.clear();
            return MatchOutcome::Rejected;
        }
        string.keys.push(button);

        let keys = string.as_slice();
        let at_full_length = keys.len() >= self.catalog.max_len();
        if !at_full_length && self.has_longer_continuation(keys) {
            return MatchOutcome::Extended;
        }

        let outcome = match self.catalog.find_exact(keys) {
            Some(command) => MatchOutcome::Completed(command.clone()),
            None if at_full_length => {
                log::warn!("command string {:?} matches no command", keys);
                MatchOutcome::Unrecognized(keys.to_vec())
            }
            None => return MatchOutcome::Extended,
        };
        string.clear();
        outcome
    }

    fn has_longer_continuation(&self, keys: &[ButtonId]) -> bool {
        self.catalog
            .commands()
            .iter()
            .any(|c| c.keys.len() > keys.len() && c.starts_with(keys))
    }
}
