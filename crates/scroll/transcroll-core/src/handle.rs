//! Completion handle for one animation.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Outcome reported when an animation settles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScrollResult {
    /// Stopped early by wheel input.
    pub interrupted: bool,
    /// An instant partial jump happened before interpolation.
    pub jumped: bool,
}

type Waiter = Box<dyn FnOnce(ScrollResult)>;

#[derive(Default)]
struct Settlement {
    result: Option<ScrollResult>,
    waiters: Vec<Waiter>,
}

/// Settles exactly once with a [`ScrollResult`].
///
/// Clones share the same settlement. Waiters registered before settlement run
/// in registration order when it happens; waiters registered afterwards run
/// immediately.
#[derive(Clone, Default)]
pub struct ScrollHandle {
    inner: Rc<RefCell<Settlement>>,
}

impl ScrollHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that is already settled with `result`.
    pub fn settled(result: ScrollResult) -> Self {
        let handle = Self::new();
        handle.settle(result);
        handle
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.inner.borrow().result.is_some()
    }

    /// Final result, once settled.
    #[inline]
    pub fn result(&self) -> Option<ScrollResult> {
        self.inner.borrow().result
    }

    /// Run `f` with the final result.
    pub fn on_settle(&self, f: impl FnOnce(ScrollResult) + 'static) {
        let ready = self.inner.borrow().result;
        match ready {
            Some(result) => f(result),
            None => self.inner.borrow_mut().waiters.push(Box::new(f)),
        }
    }

    /// Settle with `result`. Returns false if the handle was already settled,
    /// in which case `result` is dropped.
    pub(crate) fn settle(&self, result: ScrollResult) -> bool {
        let waiters = {
            let mut inner = self.inner.borrow_mut();
            if inner.result.is_some() {
                return false;
            }
            inner.result = Some(result);
            std::mem::take(&mut inner.waiters)
        };
        for waiter in waiters {
            waiter(result);
        }
        true
    }
}

impl fmt::Debug for ScrollHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ScrollHandle")
            .field("result", &inner.result)
            .field("waiters", &inner.waiters.len())
            .finish()
    }
}
