//! CLI command handler: build options, crawl, print levels.

use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::engine::fetch::HttpNeighborService;
use crate::engine::output::{print_levels, print_summary};
use crate::traversal::{Crawler, report_failed_nodes, resolve_max_workers};
use crate::utils::crawl_toml::{CrawlToml, apply_file_to_opts, load_crawl_toml};
use crate::utils::{UrlSource, service_url_from_env, setup_logging};

/// Effective options plus where they came from, for logging once the logger is up.
#[derive(Debug)]
pub struct LoadedOpts {
    pub opts: Opts,
    pub config_file: Option<PathBuf>,
    pub url_source: UrlSource,
}

/// Layer settings: defaults < `.hopcrawl.toml` < `HOPCRAWL_SERVICE_URL` < CLI flags.
pub(crate) fn merge_opts(
    cli: &Cli,
    file: Option<&CrawlToml>,
    env_url: Option<(String, UrlSource)>,
) -> (Opts, UrlSource) {
    let mut opts = Opts::default();
    let mut url_source = UrlSource::Default;
    if let Some(file) = file {
        apply_file_to_opts(file, &mut opts);
        if file.sets_service_url() {
            url_source = UrlSource::ConfigFile(file.path.clone());
        }
    }
    if let Some((url, source)) = env_url {
        opts.service_url = url;
        url_source = source;
    }
    if let Some(ref url) = cli.service_url {
        opts.service_url = url.clone();
        url_source = UrlSource::Cli;
    }
    if let Some(n) = cli.threads {
        opts.num_threads = Some(n as usize);
    }
    if let Some(secs) = cli.timeout {
        opts.timeout = Duration::from_secs(secs);
    }
    if let Some(r) = cli.retries {
        opts.retries = r;
    }
    if let Some(ref ua) = cli.user_agent {
        opts.user_agent = ua.clone();
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    if let Some(p) = cli.progress {
        opts.progress = p;
    }
    (opts, url_source)
}

/// Read the config file and environment from `dir`, then apply CLI flags.
/// Runs before logging is set up (verbosity may come from the file), so it logs nothing itself.
pub fn build_opts(cli: &Cli, dir: &Path) -> Result<LoadedOpts> {
    let file = load_crawl_toml(dir)?;
    let (opts, url_source) = merge_opts(cli, file.as_ref(), service_url_from_env(dir));
    Ok(LoadedOpts {
        opts,
        config_file: file.map(|f| f.path),
        url_source,
    })
}

/// Crawl from `cli.start` to `cli.depth` hops and print every level.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let dir = std::env::current_dir().context("resolve working directory")?;
    let LoadedOpts {
        opts,
        config_file,
        url_source,
    } = build_opts(cli, &dir)?;
    setup_logging(opts.verbose);
    match config_file {
        Some(path) => debug!("Loaded settings from {}", path.display()),
        None => debug!("No config file in {}", dir.display()),
    }
    debug!("Service URL {} (from {})", opts.service_url, url_source);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );

    let service = HttpNeighborService::new(&opts)?;
    let workers = resolve_max_workers(opts.num_threads);
    debug!("Crawling with up to {} worker(s) per level", workers);

    let crawler = Crawler::new(service, workers).with_progress(opts.verbose && opts.progress);
    let traversal = crawler.traverse(&cli.start, cli.depth);

    print_levels(&traversal)?;
    report_failed_nodes(&traversal.stats, opts.verbose);
    print_summary(&traversal);
    eprintln!(
        "Time to crawl: {}s",
        traversal.stats.elapsed.as_secs_f64()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::crawl_toml::parse_crawl_toml;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hopcrawl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn positional_args() {
        let c = cli(&["Kevin Bacon", "2", "8"]);
        assert_eq!(c.start, "Kevin Bacon");
        assert_eq!(c.depth, 2);
        assert_eq!(c.threads, Some(8));
    }

    #[test]
    fn threads_optional() {
        assert_eq!(cli(&["A", "0"]).threads, None);
    }

    #[test]
    fn rejects_bad_input() {
        let parse = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("hopcrawl").chain(args.iter().copied()))
        };
        assert!(parse(&["A", "two"]).is_err());
        assert!(parse(&["A", "-1"]).is_err());
        assert!(parse(&["A", "2", "0"]).is_err());
        assert!(parse(&["A"]).is_err());
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = parse_crawl_toml(
            "[settings]\nservice_url = \"http://file/\"\nthreads = 2\nretries = 1\n",
        )
        .unwrap();
        let env = || Some(("http://env/".to_string(), UrlSource::Environment));

        let c = cli(&["A", "1", "--service-url", "http://cli/"]);
        let (opts, source) = merge_opts(&c, Some(&file), env());
        assert_eq!(opts.service_url, "http://cli/");
        assert_eq!(source, UrlSource::Cli);
        assert_eq!(opts.num_threads, Some(2));
        assert_eq!(opts.retries, 1);

        let c = cli(&["A", "1", "4", "-r", "3"]);
        let (opts, source) = merge_opts(&c, Some(&file), env());
        assert_eq!(opts.service_url, "http://env/");
        assert_eq!(source, UrlSource::Environment);
        assert_eq!(opts.num_threads, Some(4));
        assert_eq!(opts.retries, 3);

        let (opts, source) = merge_opts(&cli(&["A", "1"]), Some(&file), None);
        assert_eq!(opts.service_url, "http://file/");
        assert_eq!(source, UrlSource::ConfigFile(PathBuf::new()));
    }

    #[test]
    fn build_opts_reports_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join(crate::utils::config::PackagePaths::get().config_filename());
        std::fs::write(&path, "[settings]\nverbose = true\n").unwrap();
        let loaded = build_opts(&cli(&["A", "1", "-s", "http://cli/"]), dir.path()).unwrap();
        assert!(loaded.opts.verbose);
        assert_eq!(loaded.config_file, Some(path));
        assert_eq!(loaded.url_source, UrlSource::Cli);
    }

    #[test]
    fn defaults_without_file_or_env() {
        let (opts, source) = merge_opts(&cli(&["A", "1"]), None, None);
        assert_eq!(source, UrlSource::Default);
        assert_eq!(opts.retries, 0);
        assert_eq!(opts.num_threads, None);
        assert!(!opts.verbose);
        assert!(opts.service_url.ends_with("/neighbors/"));
    }

    #[test]
    fn verbose_flag_without_value() {
        let (opts, _) = merge_opts(&cli(&["A", "1", "-v"]), None, None);
        assert!(opts.verbose);
    }
}
