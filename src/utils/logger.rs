use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::Level;
use std::io::Write;

/// Colors for the crawl summary printed after a traversal.
pub struct Colors;

impl Colors {
    pub const EXPANDED: &'static str = "green";
    pub const FAILED: &'static str = "red";
    pub const DISCOVERED: &'static str = "cyan";

    pub fn colorize(color: &str, text: &str) -> ColoredString {
        text.color(color)
    }
}

/// Label for the current thread when it is a named worker (e.g. `L2-w3`); `None` on main.
pub fn worker_label() -> Option<String> {
    std::thread::current()
        .name()
        .filter(|n| *n != "main")
        .map(str::to_string)
}

/// Crate at `info` (`debug` when verbose), dependencies at `warn`. Lines logged from a worker
/// carry its `L<depth>-w<index>` label so interleaved output can be traced to a level and chunk.
pub fn setup_logging(verbose: bool) {
    use log::LevelFilter;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME").cyan();
            let worker = worker_label();
            let line = match record.level() {
                Level::Error | Level::Warn => {
                    let level_str = match record.level() {
                        Level::Warn => "WARN".yellow(),
                        _ => "ERROR".red(),
                    };
                    let origin = worker.unwrap_or_else(|| record.target().to_string());
                    format!("[{} {} {}] {}", name, level_str, origin.white(), record.args())
                }
                _ => match worker {
                    Some(w) => format!("[{} {}] {}", name, w.dimmed(), record.args()),
                    None => format!("[{}] {}", name, record.args()),
                },
            };
            writeln!(buf, "{}", line)
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_label_from_thread_name() {
        let label = std::thread::Builder::new()
            .name("L1-w0".to_string())
            .spawn(worker_label)
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(label.as_deref(), Some("L1-w0"));
    }

    #[test]
    fn unnamed_thread_has_no_label() {
        let label = std::thread::spawn(worker_label).join().unwrap();
        assert_eq!(label, None);
    }
}
