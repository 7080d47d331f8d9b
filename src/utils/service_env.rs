//! Service URL lookup: env var → .env in the working directory.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::utils::config::PackagePaths;

/// Where the effective service URL came from. Logged once logging is up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UrlSource {
    Default,
    ConfigFile(PathBuf),
    Environment,
    DotEnv(PathBuf),
    Cli,
}

impl fmt::Display for UrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlSource::Default => write!(f, "built-in default"),
            UrlSource::ConfigFile(p) => write!(f, "{}", p.display()),
            UrlSource::Environment => write!(f, "${}", PackagePaths::get().service_url_env()),
            UrlSource::DotEnv(p) => write!(f, "{}", p.display()),
            UrlSource::Cli => write!(f, "--service-url"),
        }
    }
}

fn read_env(key: &str) -> Option<String> {
    let s = std::env::var(key).ok()?;
    let s = s.trim().to_string();
    (!s.is_empty()).then_some(s)
}

/// Read the service URL override: `HOPCRAWL_SERVICE_URL` → `.env` in `dir`. `None` when neither sets it.
pub fn service_url_from_env(dir: &Path) -> Option<(String, UrlSource)> {
    let key = PackagePaths::get().service_url_env();
    if let Some(s) = read_env(key) {
        return Some((s, UrlSource::Environment));
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        if let Some(s) = read_env(key) {
            return Some((s, UrlSource::DotEnv(env_path)));
        }
    }
    None
}
