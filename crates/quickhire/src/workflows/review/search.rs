use chrono::{DateTime, Duration, Utc};

/// Default quiet period before pending input is committed.
pub const DEFAULT_QUIET_MS: i64 = 200;

/// Two-stage search input pipeline: keystrokes land as *pending* input, and
/// only after a quiet period with no further input does the text become the
/// *committed* search term that mutates the filter specification.
///
/// Time is injected by the caller, so the pipeline is independent of any
/// scheduling primitive and deterministic under test. Committing on every
/// keystroke would be behaviorally equivalent, only slower.
#[derive(Debug, Clone)]
pub struct SearchPipeline {
    quiet_period: Duration,
    pending: Option<PendingInput>,
}

#[derive(Debug, Clone)]
struct PendingInput {
    text: String,
    submitted_at: DateTime<Utc>,
}

impl Default for SearchPipeline {
    fn default() -> Self {
        Self::new(Duration::milliseconds(DEFAULT_QUIET_MS))
    }
}

impl SearchPipeline {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Replace the pending input and restart the quiet period.
    pub fn submit(&mut self, text: impl Into<String>, now: DateTime<Utc>) {
        self.pending = Some(PendingInput {
            text: text.into(),
            submitted_at: now,
        });
    }

    /// Commit the pending input if its quiet period has elapsed.
    pub fn commit_due(&mut self, now: DateTime<Utc>) -> Option<String> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now - pending.submitted_at >= self.quiet_period);
        if due {
            self.pending.take().map(|pending| pending.text)
        } else {
            None
        }
    }

    /// Commit the pending input immediately (explicit submit).
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|pending| pending.text)
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.text.as_str())
    }
}
