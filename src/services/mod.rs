//! Services shared by the plugin and the command-line host

#[cfg(feature = "runtime")]
pub mod log_dirs;
pub mod time_source;
#[cfg(feature = "runtime")]
pub mod tracing_setup;
