//! Porcelain commands (user-facing repository operations)
//!
//! ## Commands
//!
//! - `deploy`: Register a local archive under a package and version
//! - `install_dogfood`: Fetch the latest Play Services build and register it

pub mod deploy;
pub mod install_dogfood;
