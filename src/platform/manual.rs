//! Scheduler driven by the caller (tests, native demo)

use super::{FrameId, FrameScheduler};

/// Records frame requests; the owner decides when a frame "fires"
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u32,
    pending: Vec<FrameId>,
    requested: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Remove and return the oldest outstanding request
    pub fn fire(&mut self) -> Option<FrameId> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    /// Total requests ever made
    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameId> {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.pending.push(id);
        self.requested += 1;
        Some(id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Some(i) = self.pending.iter().position(|p| *p == id) {
            self.pending.remove(i);
            self.cancelled += 1;
        }
    }
}
