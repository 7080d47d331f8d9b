//! Progress bar for a level's expansion. Only the orchestrator thread touches it.

use kdam::{Animation, Bar, BarExt};

use crate::utils::config::ProgressConsts;

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: String,
    pub animation: Animation,
}

impl ProgressBarConfig {
    /// Bar for expanding one level's frontier of `total` nodes.
    pub fn for_level(depth: usize, total: usize) -> Self {
        Self {
            total,
            desc: format!("Level {depth}"),
            animation: Animation::Classic,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> Bar {
    kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " nodes"
    )
}

/// Batched progress for one level: counts node reports, pushes to the bar every batch.
pub struct LevelProgress {
    bar: Option<Bar>,
    pending: usize,
}

impl LevelProgress {
    /// `enabled == false` gives a no-op tracker.
    pub fn new(enabled: bool, depth: usize, total: usize) -> Self {
        let bar = enabled.then(|| {
            let mut b = create_progress_bar(ProgressBarConfig::for_level(depth, total));
            let _ = b.refresh();
            b
        });
        Self { bar, pending: 0 }
    }

    /// Count one finished node.
    pub fn tick(&mut self) {
        let Some(bar) = self.bar.as_mut() else {
            return;
        };
        self.pending += 1;
        if self.pending >= ProgressConsts::PROGRESS_UPDATE_BATCH_SIZE {
            let _ = bar.update(self.pending);
            self.pending = 0;
        }
    }

    /// Flush the remainder and end the bar's line.
    pub fn finish(mut self) {
        if let Some(bar) = self.bar.as_mut() {
            if self.pending > 0 {
                let _ = bar.update(self.pending);
            }
            let _ = bar.refresh();
            eprintln!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_progress_is_noop() {
        let mut p = LevelProgress::new(false, 1, 10);
        for _ in 0..10 {
            p.tick();
        }
        assert_eq!(p.pending, 0);
        p.finish();
    }
}
