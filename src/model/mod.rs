//! Host capabilities the navigator runs against
//!
//! This module contains the vault (note storage), the workspace (panes and
//! editors), and the cursor position type they share.

pub mod cursor;
pub mod vault;
pub mod workspace;
