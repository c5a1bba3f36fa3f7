//! Bookkeeping for in-flight requests.
//!
//! A controller keeps one [`PendingRequest`] per request it is waiting on. A reply
//! is only accepted while the matching entry exists, so dropping the entry cancels
//! the request and any late reply is ignored.

use super::context::RequestId;

/// An in-flight request with a bounded lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: RequestId,
    remaining_ticks: u32,
}

impl PendingRequest {
    /// Starts tracking a request that may live for `timeout_ticks` timer ticks.
    ///
    /// A zero timeout is clamped to a single tick.
    #[must_use]
    pub fn new(id: RequestId, timeout_ticks: u32) -> Self {
        Self {
            id,
            remaining_ticks: timeout_ticks.max(1),
        }
    }

    #[must_use]
    pub fn is(&self, id: RequestId) -> bool {
        self.id == id
    }

    /// Advances one timer tick. Returns `true` once the request has expired.
    pub fn tick(&mut self) -> bool {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.remaining_ticks == 0
    }

    #[must_use]
    pub const fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }
}

/// Advances an optional single-slot request, clearing it when it expires.
///
/// Returns the id of the expired request.
pub fn tick_slot(slot: &mut Option<PendingRequest>) -> Option<RequestId> {
    let expired = slot.as_mut().is_some_and(PendingRequest::tick);
    if expired {
        slot.take().map(|pending| pending.id)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_timeout() {
        let mut pending = PendingRequest::new(RequestId(1), 2);
        assert!(!pending.tick());
        assert!(pending.tick());
        assert_eq!(pending.remaining_ticks(), 0);
    }

    #[test]
    fn slot_is_cleared_on_expiry() {
        let mut slot = Some(PendingRequest::new(RequestId(9), 1));
        assert_eq!(tick_slot(&mut slot), Some(RequestId(9)));
        assert!(slot.is_none());
        assert_eq!(tick_slot(&mut slot), None);
    }

    #[test]
    fn zero_timeout_still_waits_one_tick() {
        let mut slot = Some(PendingRequest::new(RequestId(3), 0));
        assert_eq!(tick_slot(&mut slot), Some(RequestId(3)));
    }
}
