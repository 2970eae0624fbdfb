use std::sync::atomic::{AtomicU64, Ordering};

/// Categories whose requests supersede each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Upload,
    Extract,
    Session,
    Assess,
    Roadmap,
}

impl Action {
    fn index(self) -> usize {
        match self {
            Action::Upload => 0,
            Action::Extract => 1,
            Action::Session => 2,
            Action::Assess => 3,
            Action::Roadmap => 4,
        }
    }
}

/// Identifies one issued request. Only the newest token per action may apply
/// its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub action: Action,
    seq: u64,
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: [AtomicU64; 5],
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request, invalidating every earlier token of the same action.
    pub fn begin(&self, action: Action) -> RequestToken {
        let seq = self.latest[action.index()].fetch_add(1, Ordering::SeqCst) + 1;
        RequestToken { action, seq }
    }

    /// Invalidates in-flight requests of `action` without starting a new one.
    pub fn supersede(&self, action: Action) {
        self.latest[action.index()].fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest[token.action.index()].load(Ordering::SeqCst) == token.seq
    }
}
