//! Load-session aggregation.
//!
//! A session tracks completion of a fixed set of image resources. Each
//! resource reports exactly once (loaded or broken); the session counts
//! reports, accumulates brokenness, and yields a terminal outcome exactly
//! once, strictly after the last report. The DOM side (probe images, event
//! binding) lives in `wasm::tracker`; this module is the ordering- and
//! counting-critical core.

/// How a resource's outcome was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmReason {
    /// The element already reported a complete load state when checked;
    /// resolved via the zero-natural-width heuristic.
    AlreadyComplete,
    /// A load event fired.
    Load,
    /// An error event fired.
    Error,
}

/// Terminal outcome of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// Every resource loaded.
    Done,
    /// At least one resource was broken.
    Fail,
}

/// Counting state for one tracking run over `total` resources.
///
/// Invariant: the terminal outcome is returned exactly once, from the call
/// that records the final resource. Reports after completion are rejected.
#[derive(Debug)]
pub struct SessionState {
    total: usize,
    progressed: usize,
    has_any_broken: bool,
    complete: bool,
}

impl SessionState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            progressed: 0,
            has_any_broken: false,
            complete: false,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Resources that have reported so far.
    pub fn progressed(&self) -> usize {
        self.progressed
    }

    pub fn has_any_broken(&self) -> bool {
        self.has_any_broken
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Complete a session that tracks nothing.
    ///
    /// A zero-resource session is vacuously done; the tracker still reports
    /// it from the deferred check tick, never synchronously with
    /// construction. Returns `None` for non-empty or already-completed
    /// sessions.
    pub fn complete_empty(&mut self) -> Option<Terminal> {
        if self.total == 0 && !self.complete {
            self.complete = true;
            Some(Terminal::Done)
        } else {
            None
        }
    }

    /// Record one resource's resolution.
    ///
    /// Returns the terminal outcome if this was the final resource, `None`
    /// otherwise. A duplicate report on a completed session is ignored and
    /// returns `None`.
    pub fn record(&mut self, is_loaded: bool) -> Option<Terminal> {
        if self.complete {
            return None;
        }
        self.progressed += 1;
        self.has_any_broken = self.has_any_broken || !is_loaded;

        if self.progressed == self.total {
            self.complete = true;
            Some(if self.has_any_broken {
                Terminal::Fail
            } else {
                Terminal::Done
            })
        } else {
            None
        }
    }
}

/// Extract every `url(...)` reference from a `background-image` value.
///
/// A computed value may carry multiple comma-separated references; all of
/// them are returned in order, with surrounding quotes stripped. `none`
/// and gradient-only values yield nothing.
pub fn extract_background_urls(value: &str) -> Vec<String> {
    let mut urls = Vec::new();
    let mut rest = value;

    while let Some(start) = rest.find("url(") {
        let after = &rest[start + 4..];
        let Some(end) = after.find(')') else {
            break;
        };
        let url = after[..end]
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .trim();
        if !url.is_empty() {
            urls.push(url.to_string());
        }
        rest = &after[end + 1..];
    }

    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_completes_done_once() {
        let mut s = SessionState::new(0);
        assert_eq!(s.complete_empty(), Some(Terminal::Done));
        assert!(s.is_complete());
        assert!(!s.has_any_broken());
        // Only once.
        assert_eq!(s.complete_empty(), None);
    }

    #[test]
    fn test_complete_empty_rejected_for_nonempty() {
        let mut s = SessionState::new(2);
        assert_eq!(s.complete_empty(), None);
        assert!(!s.is_complete());
    }

    #[test]
    fn test_all_loaded_terminates_done() {
        let mut s = SessionState::new(3);
        assert_eq!(s.record(true), None);
        assert_eq!(s.record(true), None);
        assert_eq!(s.record(true), Some(Terminal::Done));
        assert_eq!(s.progressed(), 3);
    }

    #[test]
    fn test_any_broken_terminates_fail() {
        // Brokenness sticks regardless of where in the interleaving the
        // failure lands.
        for broken_at in 0..3 {
            let mut s = SessionState::new(3);
            let mut terminal = None;
            for i in 0..3 {
                terminal = s.record(i != broken_at);
            }
            assert_eq!(terminal, Some(Terminal::Fail));
            assert!(s.has_any_broken());
        }
    }

    #[test]
    fn test_terminal_fires_exactly_once() {
        let mut s = SessionState::new(1);
        assert_eq!(s.record(true), Some(Terminal::Done));
        // A late duplicate signal must not produce a second terminal or
        // disturb the counts.
        assert_eq!(s.record(false), None);
        assert_eq!(s.progressed(), 1);
        assert!(!s.has_any_broken());
    }

    #[test]
    fn test_terminal_only_after_every_progress() {
        let mut s = SessionState::new(5);
        for i in 0..4 {
            assert_eq!(s.record(true), None, "no terminal at progress {i}");
        }
        assert_eq!(s.record(true), Some(Terminal::Done));
    }

    #[test]
    fn test_extract_single_url() {
        assert_eq!(
            extract_background_urls("url(\"https://example.com/a.jpg\")"),
            vec!["https://example.com/a.jpg"]
        );
    }

    #[test]
    fn test_extract_multiple_urls() {
        let value = "url('a.png'), url(b.png), url(\"c.png\")";
        assert_eq!(extract_background_urls(value), vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_extract_none_yields_nothing() {
        assert!(extract_background_urls("none").is_empty());
        assert!(extract_background_urls("").is_empty());
    }

    #[test]
    fn test_extract_skips_gradients() {
        let value = "linear-gradient(red, blue), url(tile.gif)";
        assert_eq!(extract_background_urls(value), vec!["tile.gif"]);
    }
}
