//! Registry of host commands and ribbon icons
//!
//! Plugins register named commands (reachable from the command palette) and
//! ribbon icons (persistent buttons). Both point at a command id; the host
//! looks the id up and hands it back to the owning plugin to run.

use std::sync::{Arc, RwLock};

/// A named, invocable command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Stable identifier, e.g. `moodnote-open-or-create-current-month`
    pub id: String,
    /// Display name
    pub name: String,
    pub icon: Option<String>,
    /// Plugin that registered the command
    pub owner: String,
}

/// A persistent button that triggers a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RibbonItem {
    pub icon: String,
    /// Tooltip
    pub title: String,
    pub command_id: String,
    pub owner: String,
}

/// Thread-safe registry shared between the host and its plugins.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Arc<RwLock<Vec<Command>>>,
    ribbon: Arc<RwLock<Vec<RibbonItem>>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command
    ///
    /// If a command with the same id already exists, it will be replaced.
    pub fn register(&self, command: Command) {
        let mut commands = self.commands.write().unwrap();
        commands.retain(|c| c.id != command.id);
        commands.push(command);
    }

    /// Add a ribbon icon. Icons are kept in insertion order.
    pub fn add_ribbon_item(&self, item: RibbonItem) {
        self.ribbon.write().unwrap().push(item);
    }

    pub fn unregister(&self, id: &str) {
        self.commands.write().unwrap().retain(|c| c.id != id);
        self.ribbon.write().unwrap().retain(|r| r.command_id != id);
    }

    /// Remove every command and icon registered by `owner`
    pub fn unregister_owner(&self, owner: &str) {
        self.commands.write().unwrap().retain(|c| c.owner != owner);
        self.ribbon.write().unwrap().retain(|r| r.owner != owner);
    }

    pub fn get(&self, id: &str) -> Option<Command> {
        self.commands
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn get_all(&self) -> Vec<Command> {
        self.commands.read().unwrap().clone()
    }

    pub fn ribbon_items(&self) -> Vec<RibbonItem> {
        self.ribbon.read().unwrap().clone()
    }

    /// Command id behind the ribbon icon at `index`
    pub fn ribbon_command(&self, index: usize) -> Option<String> {
        self.ribbon
            .read()
            .unwrap()
            .get(index)
            .map(|r| r.command_id.clone())
    }
}
