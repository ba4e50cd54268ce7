//! Layered configuration resolution.
//!
//! Sources are merged field-by-field, lowest precedence first:
//! 1. **Defaults** - supplied by the caller
//! 2. **System** - `/etc/<app>/config`, `/etc/<app>rc` (not on Windows)
//! 3. **User** - `~/.config/<app>/config`, `~/.config/<app>`, `~/.<app>/config`, `~/.<app>rc`
//! 4. **Project** - the nearest `.<app>rc` from the working directory upward
//! 5. **Explicit files** - `<APP>_config` from the environment, then `--config`
//! 6. **Environment** - `<APP>_SECTION__KEY=value`
//! 7. **Arguments** - parsed command line
//!
//! ## Merge Strategy
//! - Mappings merge recursively; scalars and lists are replaced
//! - Files are JSON when they start with `{`, INI otherwise
//! - A file that fails to parse aborts the whole cascade; a missing one is skipped

pub mod cascade;
pub mod discovery;
pub mod env;
pub mod ini;
pub mod keypath;
pub mod merge;
pub mod parse;
pub mod value;

/// A nested configuration mapping.
pub type Tree = serde_json::Map<String, serde_json::Value>;

pub use cascade::{CONFIG_KEY, CONFIGS_KEY, CascadeContext, Resolved, config, config_argv};
pub use discovery::{Candidate, Origin};
pub use keypath::{KeyPath, TreePath};
pub use merge::{deep_merge, merge, merge_all};
pub use parse::{Format, parse};
pub use value::coerce;
