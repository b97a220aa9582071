// moodnote library - exposes all core modules for the binary and tests

rust_i18n::i18n!("locales", fallback = "en");

pub mod command_registry;
pub mod config;
#[cfg(feature = "runtime")]
pub mod config_io;
pub mod model;
pub mod navigator;
pub mod note;
pub mod notice;
pub mod plugin;
pub mod services;
