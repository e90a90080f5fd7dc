use std::cell::RefCell;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled at stage={stage}")]
pub struct Cancelled {
    pub stage: &'static str,
}

/// Shared cancel flag. Clones observe the same flag, and it can be moved to a
/// worker thread.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn check_cancelled(&self, stage: &'static str) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled { stage });
        }
        Ok(())
    }
}

/// Holds at most one outstanding task. Starting a new task cancels the
/// previous one, so only the latest request can complete.
#[derive(Debug, Default)]
pub struct TaskSlot {
    current: RefCell<Option<CancellationToken>>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the outstanding task (if any) and returns the token for the next one.
    pub fn replace(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let previous = self.current.borrow_mut().replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }
        token
    }

    pub fn cancel(&self) {
        let previous = self.current.borrow_mut().take();
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    /// True while the most recently started task has not been cancelled.
    pub fn is_active(&self) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_some_and(|t| !t.is_cancelled())
    }
}
