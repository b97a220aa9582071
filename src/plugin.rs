//! The moodnote plugin shell
//!
//! Wires the navigator into a host: loads and saves settings, registers the
//! "open today" command and its ribbon icon, and turns any failure of the
//! routine into a log entry plus one transient notice.

use crate::command_registry::{Command, CommandRegistry, RibbonItem};
use crate::config::{ConfigError, MoodnoteConfig, SettingsStore};
use crate::model::vault::SharedVault;
use crate::model::workspace::Workspace;
use crate::navigator::{MonthlyNoteNavigator, NavigationReport};
use crate::notice::{Notice, NoticeBoard};
use crate::services::time_source::SharedTimeSource;
use rust_i18n::t;

/// Plugin identifier, also the owner of its commands.
pub const PLUGIN_ID: &str = "moodnote";

/// Command that opens this month's note at today's entry.
pub const OPEN_TODAY_COMMAND: &str = "moodnote-open-or-create-current-month";

/// Icon shown on the ribbon and next to the command.
pub const CALENDAR_ICON: &str = "calendar";

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed(NavigationReport),
    /// The routine failed; the notice has been posted.
    Failed(Notice),
    /// The command id does not belong to this plugin.
    Unknown,
}

/// One row of the settings tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingEntry {
    pub key: &'static str,
    pub name: String,
    pub description: String,
    pub placeholder: String,
    pub value: String,
}

/// The settings tab as the host renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsTab {
    pub title: String,
    pub entries: Vec<SettingEntry>,
}

pub struct MoodnotePlugin {
    settings: MoodnoteConfig,
    store: Box<dyn SettingsStore>,
    vault: SharedVault,
    time: SharedTimeSource,
    notices: NoticeBoard,
}

impl MoodnotePlugin {
    pub fn new(vault: SharedVault, time: SharedTimeSource, store: Box<dyn SettingsStore>) -> Self {
        Self {
            settings: MoodnoteConfig::default(),
            store,
            vault,
            time,
            notices: NoticeBoard::new(),
        }
    }

    /// Load settings and register the command and ribbon icon.
    pub fn load(&mut self, registry: &CommandRegistry) -> Result<(), ConfigError> {
        self.load_settings()?;

        let title = t!("command.open_today", locale = self.settings.locale.as_str()).into_owned();
        registry.add_ribbon_item(RibbonItem {
            icon: CALENDAR_ICON.to_string(),
            title: title.clone(),
            command_id: OPEN_TODAY_COMMAND.to_string(),
            owner: PLUGIN_ID.to_string(),
        });
        registry.register(Command {
            id: OPEN_TODAY_COMMAND.to_string(),
            name: title,
            icon: Some(CALENDAR_ICON.to_string()),
            owner: PLUGIN_ID.to_string(),
        });
        tracing::info!("Loaded moodnote plugin, folder {:?}", self.settings.folder_path);
        Ok(())
    }

    pub fn unload(&mut self, registry: &CommandRegistry) {
        registry.unregister_owner(PLUGIN_ID);
    }

    pub fn load_settings(&mut self) -> Result<(), ConfigError> {
        self.settings = MoodnoteConfig::from_data(self.store.load_data()?)?;
        Ok(())
    }

    pub fn save_settings(&mut self) -> Result<(), ConfigError> {
        let data = self.settings.to_data()?;
        self.store.save_data(&data)
    }

    pub fn settings(&self) -> &MoodnoteConfig {
        &self.settings
    }

    /// Change settings for this session only; call `save_settings` to persist.
    pub fn settings_mut(&mut self) -> &mut MoodnoteConfig {
        &mut self.settings
    }

    /// Update the folder path and persist it.
    pub fn set_folder_path(&mut self, value: &str) -> Result<(), ConfigError> {
        self.settings.folder_path = value.to_string();
        self.save_settings()
    }

    pub fn settings_tab(&self) -> SettingsTab {
        let locale = self.settings.locale.as_str();
        SettingsTab {
            title: t!("settings.title", locale = locale).into_owned(),
            entries: vec![SettingEntry {
                key: "folderPath",
                name: t!("settings.folder_path.name", locale = locale).into_owned(),
                description: t!("settings.folder_path.description", locale = locale).into_owned(),
                placeholder: crate::note::path::DEFAULT_FOLDER_PATH.to_string(),
                value: self.settings.folder_path.clone(),
            }],
        }
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Run one of this plugin's commands.
    pub fn execute(&mut self, command_id: &str, workspace: &mut dyn Workspace) -> CommandOutcome {
        if command_id != OPEN_TODAY_COMMAND {
            return CommandOutcome::Unknown;
        }
        self.open_today(workspace)
    }

    /// Run the command behind the ribbon icon at `index`.
    pub fn click_ribbon(
        &mut self,
        registry: &CommandRegistry,
        index: usize,
        workspace: &mut dyn Workspace,
    ) -> CommandOutcome {
        match registry.ribbon_command(index) {
            Some(command_id) => self.execute(&command_id, workspace),
            None => CommandOutcome::Unknown,
        }
    }

    fn open_today(&mut self, workspace: &mut dyn Workspace) -> CommandOutcome {
        let navigator = MonthlyNoteNavigator::new(self.vault.as_ref(), self.time.as_ref());
        match navigator.open_today_entry(workspace, &self.settings) {
            Ok(report) => CommandOutcome::Completed(report),
            Err(e) => {
                tracing::error!("moodnote failed: {}", e);
                let message = t!("notice.failed", locale = self.settings.locale.as_str()).into_owned();
                let now = self.time.now();
                self.notices.expire(now);
                let notice = self.notices.show(message, now).clone();
                CommandOutcome::Failed(notice)
            }
        }
    }
}
