//! rc-cascade: layered application configuration.
//!
//! Resolves an application's configuration from system, user and project rc
//! files, the environment and the command line into one nested tree.
//!
//! ```no_run
//! use rc_cascade::config::{Tree, config};
//!
//! let resolved = config("myapp", Tree::new())?;
//! println!("{}", serde_json::Value::from(resolved));
//! # Ok::<(), rc_cascade::error::RcError>(())
//! ```

pub mod argv;
pub mod cli;
pub mod config;
pub mod error;
