//! One-shot cancellation for a single component instance.
//!
//! A token is created with the component, cloned into every asynchronous call
//! it issues, and fired once on teardown. Fired tokens stay fired.

use std::{
    cell::{Cell, RefCell},
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll, Waker},
};

use futures::future::{select, Either};

#[derive(Default)]
struct Inner {
    cancelled: Cell<bool>,
    wakers: RefCell<Vec<Waker>>,
}

/// Shared, single-threaded cancellation flag.
#[derive(Clone, Default)]
pub struct CancellationToken {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl CancellationToken {
    /// Fresh, un-fired token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the token and wakes everything waiting on it. Idempotent.
    pub fn cancel(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        let wakers = std::mem::take(&mut *self.inner.wakers.borrow_mut());
        for waker in wakers {
            waker.wake();
        }
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    /// Future that resolves once the token fires.
    pub fn cancelled(&self) -> WaitForCancellation {
        WaitForCancellation {
            token: self.clone(),
        }
    }

    /// Drives `fut` until it completes or the token fires.
    ///
    /// Returns `None` when the token fired first, or fired while `fut` was
    /// completing, so callers never apply a result after teardown.
    pub async fn run<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return None;
        }
        let fut = std::pin::pin!(fut);
        match select(fut, self.cancelled()).await {
            Either::Left((output, _)) if !self.is_cancelled() => Some(output),
            _ => None,
        }
    }
}

/// Returned by [`CancellationToken::cancelled`].
pub struct WaitForCancellation {
    token: CancellationToken,
}

impl Future for WaitForCancellation {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.token.is_cancelled() {
            return Poll::Ready(());
        }
        let mut wakers = self.token.inner.wakers.borrow_mut();
        if !wakers.iter().any(|w| w.will_wake(cx.waker())) {
            wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}
