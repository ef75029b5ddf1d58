//! Local filesystem access for envchanter
//!
//! Env-files hold secrets, so every write goes through [`io::write_private`],
//! which replaces the target atomically and leaves it readable by the owner only.

pub mod error;
pub mod io;

pub use error::{Error, Result};
