//! Spinner 闸门
//!
//! 每个视图持有一个 `Spinner<P>`，`P` 描述正在等待的操作。
//! 它同时承担三件事：
//!     - 加载动画；
//!     - 闸门：`is_active()` 为真时视图不再发起新的任务；
//!     - 过期判定：只有与当前 seq 相同的结果才会被 `finish` 接受。

use std::sync::atomic::{AtomicU64, Ordering};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// 全局递增的任务序号；不同视图之间也不会重复
static NEXT_SEQ: AtomicU64 = AtomicU64::new(1);

fn next_seq() -> u64 {
    NEXT_SEQ.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug)]
pub struct Spinner<P> {
    pending: Option<(u64, P)>,
    label: String,
    frame: usize,
}

impl<P> Default for Spinner<P> {
    fn default() -> Self {
        Self {
            pending: None,
            label: String::new(),
            frame: 0,
        }
    }
}

impl<P> Spinner<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始等待 `op`，返回新任务的 seq
    pub fn start(&mut self, label: impl Into<String>, op: P) -> u64 {
        let seq = next_seq();
        self.pending = Some((seq, op));
        self.label = label.into();
        self.frame = 0;
        seq
    }

    /// 结果到达；seq 不匹配时返回 `None`，调用方应丢弃该结果
    pub fn finish(&mut self, seq: u64) -> Option<P> {
        match self.pending.take() {
            Some((pending, op)) if pending == seq => Some(op),
            other => {
                self.pending = other;
                log::debug!("discarding stale result seq={seq}");
                None
            }
        }
    }

    /// 放弃等待中的任务；其结果到达时会被当作过期结果丢弃
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tick(&mut self) {
        if self.is_active() {
            self.frame = (self.frame + 1) % FRAMES.len();
        }
    }

    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame % FRAMES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_current_seq_is_accepted() {
        let mut spinner = Spinner::new();
        let first = spinner.start("loading", 1);
        assert!(spinner.is_active());

        assert_eq!(spinner.finish(first + 1000), None);
        assert!(spinner.is_active());

        assert_eq!(spinner.finish(first), Some(1));
        assert!(!spinner.is_active());
        assert_eq!(spinner.finish(first), None);
    }

    #[test]
    fn restart_invalidates_previous_seq() {
        let mut spinner = Spinner::new();
        let old = spinner.start("a", "old");
        let new = spinner.start("b", "new");
        assert_ne!(old, new);
        assert_eq!(spinner.finish(old), None);
        assert_eq!(spinner.finish(new), Some("new"));
    }

    #[test]
    fn cancelled_result_is_stale() {
        let mut spinner = Spinner::new();
        let seq = spinner.start("x", ());
        spinner.cancel();
        assert_eq!(spinner.finish(seq), None);
    }

    #[test]
    fn tick_only_animates_while_active() {
        let mut spinner: Spinner<()> = Spinner::new();
        let idle = spinner.glyph();
        spinner.tick();
        assert_eq!(spinner.glyph(), idle);
        spinner.start("x", ());
        spinner.tick();
        assert_ne!(spinner.glyph(), idle);
    }
}
