//! Latest-wins request slot.
//!
//! Used for queries that are re-issued on every keystroke: starting a new
//! query cancels the one in flight instead of queueing behind it.

use std::{cell::RefCell, rc::Rc};

use crate::cancel::CancellationToken;

/// Holds the token of the query currently allowed to publish results.
#[derive(Clone, Default)]
pub struct Supersede {
    current: Rc<RefCell<Option<CancellationToken>>>,
}

impl Supersede {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the previous query and returns the token for a new one.
    pub fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.current.borrow_mut().replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Cancels the running query without starting another.
    pub fn clear(&self) {
        if let Some(previous) = self.current.borrow_mut().take() {
            previous.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_cancels_previous() {
        let slot = Supersede::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }

    #[test]
    fn clear_cancels_current() {
        let slot = Supersede::new();
        let only = slot.begin();
        slot.clear();
        assert!(only.is_cancelled());
    }
}
