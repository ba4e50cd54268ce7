//! Candidate config file discovery.
//!
//! Candidates, lowest precedence first:
//! 1. `/etc/<app>/config`, `/etc/<app>rc` (skipped on Windows)
//! 2. `~/.config/<app>/config`, `~/.config/<app>`, `~/.<app>/config`, `~/.<app>rc`
//! 3. The nearest `.<app>rc` walking up from the working directory
//! 4. The file named by the environment `config` key
//! 5. The file named by the argument `config` key

use super::cascade::CascadeContext;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Where a candidate path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Origin {
    /// Fixed system location under `/etc`
    System = 0,
    /// Location under the user's home directory
    User = 1,
    /// Nearest rc file above the working directory
    Project = 2,
    /// Path given by the `<APP>_config` environment variable
    Environment = 3,
    /// Path given by the `config` argument
    Arguments = 4,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::System => write!(f, "system"),
            Origin::User => write!(f, "user"),
            Origin::Project => write!(f, "project"),
            Origin::Environment => write!(f, "environment"),
            Origin::Arguments => write!(f, "arguments"),
        }
    }
}

/// A path that may hold configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub origin: Origin,
}

/// List candidate files for `app` in precedence order, without duplicates.
///
/// Nothing here reads file content; missing candidates are filtered out
/// later when they fail to read.
pub fn candidates(
    ctx: &CascadeContext,
    app: &str,
    env_config: Option<&str>,
    arg_config: Option<&str>,
) -> Vec<Candidate> {
    let mut found = Vec::new();

    if !ctx.windows {
        found.push((ctx.etc_dir.join(app).join("config"), Origin::System));
        found.push((ctx.etc_dir.join(format!("{app}rc")), Origin::System));
    }

    if let Some(ref home) = ctx.home {
        found.push((home.join(".config").join(app).join("config"), Origin::User));
        found.push((home.join(".config").join(app), Origin::User));
        found.push((home.join(format!(".{app}")).join("config"), Origin::User));
        found.push((home.join(format!(".{app}rc")), Origin::User));
    }

    if let Some(ref cwd) = ctx.cwd
        && let Some(local) = find_upward(cwd, &format!(".{app}rc"))
    {
        found.push((local, Origin::Project));
    }

    for (explicit, origin) in [
        (env_config, Origin::Environment),
        (arg_config, Origin::Arguments),
    ] {
        if let Some(path) = explicit.filter(|p| !p.is_empty()) {
            found.push((absolute(ctx.cwd.as_deref(), Path::new(path)), origin));
        }
    }

    dedup(found)
}

/// Find the closest ancestor of `start` (inclusive) holding a file `name`.
pub fn find_upward(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn absolute(cwd: Option<&Path>, path: &Path) -> PathBuf {
    match cwd {
        Some(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    }
}

/// Identity used for deduplication: the canonical path when it exists,
/// otherwise the path as written.
fn identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn dedup(found: Vec<(PathBuf, Origin)>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    found
        .into_iter()
        .filter(|(path, _)| seen.insert(identity(path)))
        .map(|(path, origin)| Candidate { path, origin })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(candidates: &[Candidate]) -> Vec<PathBuf> {
        candidates.iter().map(|c| c.path.clone()).collect()
    }

    #[test]
    fn test_full_candidate_order() {
        let ctx = CascadeContext::new()
            .with_etc_dir("/etc")
            .with_home("/home/u");
        let found = candidates(&ctx, "demo", Some("/env/demo.json"), Some("/arg/demo.json"));
        assert_eq!(
            paths(&found),
            [
                PathBuf::from("/etc/demo/config"),
                PathBuf::from("/etc/demorc"),
                PathBuf::from("/home/u/.config/demo/config"),
                PathBuf::from("/home/u/.config/demo"),
                PathBuf::from("/home/u/.demo/config"),
                PathBuf::from("/home/u/.demorc"),
                PathBuf::from("/env/demo.json"),
                PathBuf::from("/arg/demo.json"),
            ]
        );
        let origins: Vec<Origin> = found.iter().map(|c| c.origin).collect();
        assert!(origins.is_sorted());
    }

    #[test]
    fn test_windows_skips_etc() {
        let ctx = CascadeContext::new().with_windows(true).with_home("/home/u");
        let found = candidates(&ctx, "demo", None, None);
        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|c| c.origin == Origin::User));
    }

    #[test]
    fn test_no_home_no_cwd() {
        let ctx = CascadeContext::new();
        let found = candidates(&ctx, "demo", None, None);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_identical_overrides_deduplicated() {
        let ctx = CascadeContext::new().with_windows(true);
        let found = candidates(&ctx, "demo", Some("/x/rc"), Some("/x/rc"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].origin, Origin::Environment);
    }

    #[test]
    fn test_relative_override_resolved_against_cwd() {
        let temp = TempDir::new().unwrap();
        let ctx = CascadeContext::new()
            .with_windows(true)
            .with_cwd(temp.path());
        let found = candidates(&ctx, "demo", None, Some("conf/demo.ini"));
        assert_eq!(paths(&found), [temp.path().join("conf/demo.ini")]);
    }

    #[test]
    fn test_equivalent_paths_deduplicated() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("demorc");
        std::fs::write(&real, "a = 1").unwrap();
        let ctx = CascadeContext::new().with_windows(true);
        let dotted = temp.path().join(".").join("demorc");
        let found = candidates(
            &ctx,
            "demo",
            real.to_str(),
            dotted.to_str(),
        );
        assert_eq!(paths(&found), [real]);
    }

    #[test]
    fn test_find_upward_nearest_wins() {
        let temp = TempDir::new().unwrap();
        let deep = temp.path().join("a").join("b").join("c");
        std::fs::create_dir_all(&deep).unwrap();
        std::fs::write(temp.path().join(".demorc"), "").unwrap();
        std::fs::write(temp.path().join("a").join(".demorc"), "").unwrap();

        assert_eq!(
            find_upward(&deep, ".demorc"),
            Some(temp.path().join("a").join(".demorc"))
        );
        assert_eq!(find_upward(&deep, ".absentrc"), None);
    }

    #[test]
    fn test_find_upward_includes_start_and_ignores_directories() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".demorc")).unwrap();
        let nested = temp.path().join("n");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join(".demorc"), "").unwrap();

        assert_eq!(find_upward(&nested, ".demorc"), Some(nested.join(".demorc")));
        assert_ne!(find_upward(temp.path(), ".demorc"), Some(temp.path().join(".demorc")));
    }
}
