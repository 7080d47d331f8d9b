//! Application configuration constants.
//! Tuning and defaults in one place.

use std::sync::OnceLock;
use std::time::Duration;

// ---- Package names (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
    service_url_env: String,
    user_agent: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
                service_url_env: format!("{}_SERVICE_URL", pkg.to_uppercase()),
                user_agent: format!("{pkg}/{}", env!("CARGO_PKG_VERSION")),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// `.hopcrawl.toml`, looked up in the working directory.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// `HOPCRAWL_SERVICE_URL`
    pub fn service_url_env(&self) -> &str {
        &self.service_url_env
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

// ---- Worker threads ----

/// Thread limits for choosing a default worker count.
/// Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Floor when nothing else is known.
    pub floor: usize,
    /// Max workers picked automatically. Requests are latency-bound so this may exceed core count.
    pub network_max: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
            network_max: Self::NETWORK_MAX_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 2;
    pub const NETWORK_MAX_THREADS: usize = 12;
    /// Requests in flight per core when picking a default.
    pub const REQUESTS_PER_CORE: usize = 2;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }

    /// Default worker count: a couple of requests per core, bounded by floor and network max.
    pub fn default_workers(&self) -> usize {
        (self.all_threads * Self::REQUESTS_PER_CORE).clamp(self.floor, self.network_max)
    }
}

// ---- HTTP ----

/// Neighbor service defaults.
pub struct HttpConsts;

impl HttpConsts {
    pub const DEFAULT_SERVICE_URL: &'static str =
        "http://hollywood-graph-crawler.bridgesuncc.org/neighbors/";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    /// No retry by default: a node that fails once is a leaf for this run.
    pub const DEFAULT_RETRIES: u32 = 0;
    /// First retry delay; doubles each attempt.
    pub const INITIAL_BACKOFF: Duration = Duration::from_millis(250);
    pub const MAX_BACKOFF: Duration = Duration::from_secs(5);
    /// Payload handed to the decoder when the transport fails.
    pub const NEUTRAL_PAYLOAD: &'static [u8] = b"{}";
}

// ---- Progress ----

/// Progress counter tuning.
pub struct ProgressConsts;

impl ProgressConsts {
    /// Reports to receive before pushing an update to the bar (reduce lock contention).
    pub const PROGRESS_UPDATE_BATCH_SIZE: usize = 16;
}
