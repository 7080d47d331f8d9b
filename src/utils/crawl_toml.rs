//! Load `.hopcrawl.toml` from a directory (CLI only). Lib does not use this; the consuming program injects config via CrawlOpts.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CrawlToml {
    #[serde(default)]
    settings: CrawlSection,
    /// File this was loaded from; empty when parsed from a string.
    #[serde(skip)]
    pub(crate) path: PathBuf,
}

impl CrawlToml {
    pub(crate) fn sets_service_url(&self) -> bool {
        self.settings.service_url.is_some()
    }
}

#[derive(Debug, Default, Deserialize)]
struct CrawlSection {
    service_url: Option<String>,
    threads: Option<usize>,
    timeout_secs: Option<u64>,
    retries: Option<u32>,
    user_agent: Option<String>,
    verbose: Option<bool>,
    progress: Option<bool>,
}

/// Load `.hopcrawl.toml` from `dir`. `Ok(None)` when there is no such file; a file that exists but
/// cannot be read or parsed is an error so the crawl never starts on half-applied settings. CLI only.
pub(crate) fn load_crawl_toml(dir: &Path) -> Result<Option<CrawlToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    if !path.is_file() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let mut file = parse_crawl_toml(&s).with_context(|| format!("parse {}", path.display()))?;
    file.path = path;
    Ok(Some(file))
}

pub(crate) fn parse_crawl_toml(s: &str) -> Result<CrawlToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $file_field:ident => $opts_field:ident) => {
        if let Some(v) = $section.$file_field.clone() {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only set fields present in the file). Call before env and CLI.
pub(crate) fn apply_file_to_opts(file: &CrawlToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, service_url => service_url);
    if let Some(n) = s.threads {
        opts.num_threads = Some(n);
    }
    if let Some(secs) = s.timeout_secs {
        opts.timeout = Duration::from_secs(secs);
    }
    apply_file_opt!(s, opts, retries => retries);
    apply_file_opt!(s, opts, user_agent => user_agent);
    apply_file_opt!(s, opts, verbose => verbose);
    apply_file_opt!(s, opts, progress => progress);
}
