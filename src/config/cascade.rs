//! The configuration cascade.
//!
//! Merge order, lowest precedence first:
//! `defaults → file₁ … fileₙ → environment → arguments → provenance`.
//! Provenance records the consulted files under `configs` and the last one
//! under `config`.

use super::discovery::{self, Candidate};
use super::env::parse_env;
use super::keypath::TreePath;
use super::merge::merge_all;
use super::parse::parse;
use super::Tree;
use crate::argv::parse_args;
use crate::error::{RcError, Result};
use serde::Serialize;
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reserved key listing every consulted file.
pub const CONFIGS_KEY: &str = "configs";

/// Reserved key naming the highest-precedence consulted file.
pub const CONFIG_KEY: &str = "config";

/// Process facts the cascade depends on.
///
/// Captured once so the cascade itself reads nothing global besides files.
#[derive(Debug, Clone)]
pub struct CascadeContext {
    /// System config directory (`/etc`)
    pub etc_dir: PathBuf,
    /// User home directory, if resolvable
    pub home: Option<PathBuf>,
    /// Working directory the project search starts from
    pub cwd: Option<PathBuf>,
    /// Whether system locations are skipped
    pub windows: bool,
    /// Environment snapshot
    pub env: Vec<(String, String)>,
}

/// Same as [`CascadeContext::new`]; use [`CascadeContext::discover`] for the
/// running process.
impl Default for CascadeContext {
    fn default() -> Self {
        Self {
            etc_dir: PathBuf::from("/etc"),
            home: None,
            cwd: None,
            windows: false,
            env: Vec::new(),
        }
    }
}

impl CascadeContext {
    /// A context with no home, no working directory and no environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process: home, cwd, OS family and environment.
    ///
    /// Environment entries that are not valid Unicode are dropped.
    pub fn discover() -> Self {
        Self {
            etc_dir: PathBuf::from("/etc"),
            home: dirs::home_dir(),
            cwd: std::env::current_dir().ok(),
            windows: cfg!(windows),
            env: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    pub fn with_etc_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.etc_dir = dir.into();
        self
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_windows(mut self, windows: bool) -> Self {
        self.windows = windows;
        self
    }

    /// Replace the environment snapshot.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Add one environment variable to the snapshot.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// The environment tree for `app`.
    pub fn env_tree(&self, app: &str) -> Tree {
        parse_env(app, self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Resolve the configuration for `app`.
    ///
    /// Fails on the first file that cannot be parsed; missing files are
    /// skipped. A panic anywhere inside the cascade is reported as
    /// [`RcError::Internal`].
    pub fn resolve(&self, app: &str, defaults: Tree, argv: Tree) -> Result<Resolved> {
        guarded(|| self.cascade(app, defaults, argv))
    }

    fn cascade(&self, app: &str, defaults: Tree, argv: Tree) -> Result<Resolved> {
        validate_app_name(app)?;

        let env = self.env_tree(app);
        let candidates = discovery::candidates(
            self,
            app,
            env.get(CONFIG_KEY).and_then(Value::as_str),
            argv.get(CONFIG_KEY).and_then(Value::as_str),
        );

        let mut layers = vec![defaults];
        let mut sources = Vec::new();
        for candidate in candidates {
            if let Some(tree) = load(&candidate)? {
                layers.push(tree);
                sources.push(candidate.path);
            }
        }

        layers.push(env);
        layers.push(argv);
        layers.push(provenance(&sources));

        info!(app, sources = sources.len(), "configuration resolved");
        Ok(Resolved {
            tree: merge_all(layers),
            sources,
        })
    }
}

/// Run `f`, reporting a panic as [`RcError::Internal`].
fn guarded<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(RcError::from_panic(payload)))
}

/// Read and parse one candidate. `Ok(None)` means it could not be read.
fn load(candidate: &Candidate) -> Result<Option<Tree>> {
    let content = match std::fs::read(&candidate.path) {
        Ok(content) => content,
        Err(err) => {
            debug!(
                path = %candidate.path.display(),
                origin = %candidate.origin,
                error = %err,
                "skipping config candidate"
            );
            return Ok(None);
        }
    };
    let tree = parse(&content).map_err(|source| RcError::parse(&candidate.path, source))?;
    debug!(
        path = %candidate.path.display(),
        origin = %candidate.origin,
        keys = tree.len(),
        "loaded config file"
    );
    Ok(Some(tree))
}

fn provenance(sources: &[PathBuf]) -> Tree {
    let mut info = Tree::new();
    info.insert(
        CONFIGS_KEY.to_string(),
        Value::Array(sources.iter().map(|p| path_value(p)).collect()),
    );
    if let Some(last) = sources.last() {
        info.insert(CONFIG_KEY.to_string(), path_value(last));
    }
    info
}

fn path_value(path: &Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

/// App names become path segments and environment prefixes.
fn validate_app_name(app: &str) -> Result<()> {
    let bad = |c: char| matches!(c, '/' | '\\' | '=' | '\0') || c.is_whitespace();
    if app.is_empty() || app.chars().any(bad) {
        return Err(RcError::InvalidAppName(app.to_string()));
    }
    Ok(())
}

/// The merged configuration and the files it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Resolved {
    tree: Tree,
    #[serde(skip)]
    sources: Vec<PathBuf>,
}

impl Resolved {
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Consulted files, lowest precedence first.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// The highest-precedence consulted file.
    pub fn config_path(&self) -> Option<&Path> {
        self.sources.last().map(PathBuf::as_path)
    }

    /// Look up a dotted key, e.g. `db.host`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.tree.get_path(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }
}

impl From<Resolved> for Value {
    fn from(resolved: Resolved) -> Self {
        Value::Object(resolved.tree)
    }
}

/// Resolve `app` using the process context and the process arguments.
pub fn config(app: &str, defaults: Tree) -> Result<Resolved> {
    let argv = parse_args(
        std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned()),
    );
    config_argv(app, defaults, argv)
}

/// Resolve `app` using the process context and an already-parsed argument tree.
pub fn config_argv(app: &str, defaults: Tree, argv: Tree) -> Result<Resolved> {
    CascadeContext::discover().resolve(app, defaults, argv)
}
