//! Reactive value source and text sinks.
//!
//! A [`ValueSource`] is a bounded numeric cell that notifies its listeners
//! synchronously, in subscription order, on the thread that changed it. At
//! most one notification is in flight per source: a listener that writes
//! back to the source it is being notified by gets
//! [`Error::ReentrantUpdate`].

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Listener = Rc<RefCell<Box<dyn FnMut(f64)>>>;

struct Inner {
    value: f64,
    min: f64,
    max: f64,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
    notifying: bool,
}

impl Inner {
    fn is_subscribed(&self, id: u64) -> bool {
        self.listeners.iter().any(|(other, _)| *other == id)
    }
}

/// Clears the in-flight flag even if a listener panics.
struct NotifyGuard<'a>(&'a RefCell<Inner>);

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        self.0.borrow_mut().notifying = false;
    }
}

/// Handle returned by [`ValueSource::on_change`].
#[must_use = "dropping a subscription handle makes the listener impossible to remove"]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
}

impl Subscription {
    /// Listener id, unique per source.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Shared, bounded, observable `f64` cell.
///
/// Cloning yields another handle to the same cell.
#[derive(Clone)]
pub struct ValueSource {
    inner: Rc<RefCell<Inner>>,
}

impl ValueSource {
    /// Create a source holding `value` within `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty or non-finite range and
    /// [`Error::Range`] if `value` lies outside it.
    pub fn new(value: f64, min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || max <= min {
            return Err(Error::config("max_value", format!("source range [{min}, {max}] is empty")));
        }
        if !(min..=max).contains(&value) {
            return Err(Error::Range { value, min, max });
        }
        Ok(Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                min,
                max,
                listeners: Vec::new(),
                next_id: 0,
                notifying: false,
            })),
        })
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        self.inner.borrow().value
    }

    /// Accepted range.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        let inner = self.inner.borrow();
        (inner.min, inner.max)
    }

    /// Store `value` and notify every listener.
    ///
    /// Setting the current value again is a no-op and notifies nobody.
    ///
    /// # Errors
    ///
    /// - [`Error::ReentrantUpdate`] when called from one of this source's listeners.
    /// - [`Error::Range`] when `value` lies outside the bounds; the stored value is kept.
    pub fn set(&self, value: f64) -> Result<()> {
        let snapshot = {
            let mut inner = self.inner.borrow_mut();
            if inner.notifying {
                return Err(Error::ReentrantUpdate);
            }
            if !(inner.min..=inner.max).contains(&value) {
                return Err(Error::Range { value, min: inner.min, max: inner.max });
            }
            if value == inner.value {
                return Ok(());
            }
            inner.value = value;
            inner.notifying = true;
            inner.listeners.clone()
        };

        let _guard = NotifyGuard(&self.inner);
        for (id, listener) in snapshot {
            // Listeners removed by an earlier listener in this round are skipped.
            if !self.inner.borrow().is_subscribed(id) {
                continue;
            }
            if let Ok(mut callback) = listener.try_borrow_mut() {
                callback(value);
            }
        }
        Ok(())
    }

    /// Register `callback` to run after every change.
    ///
    /// A listener added during a notification first runs on the next change.
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(f64) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let boxed: Box<dyn FnMut(f64)> = Box::new(callback);
        inner.listeners.push((id, Rc::new(RefCell::new(boxed))));
        Subscription { id }
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(id, _)| *id != subscription.id);
        inner.listeners.len() != before
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Whether a notification is currently running.
    #[must_use]
    pub fn is_notifying(&self) -> bool {
        self.inner.borrow().notifying
    }
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ValueSource")
            .field("value", &inner.value)
            .field("min", &inner.min)
            .field("max", &inner.max)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Destination for the formatted value label.
pub trait TextSink {
    /// Replace the displayed text.
    fn set_text(&mut self, text: &str);
}

impl TextSink for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Shared text cell, usable both as a sink and as caller-supplied label text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedText {
    inner: Rc<RefCell<String>>,
}

impl SharedText {
    /// Create a cell holding `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { inner: Rc::new(RefCell::new(text.into())) }
    }

    /// Copy of the current text.
    #[must_use]
    pub fn get(&self) -> String {
        self.inner.borrow().clone()
    }

    /// Replace the text.
    pub fn set(&self, text: &str) {
        self.inner.borrow_mut().set_text(text);
    }
}

impl TextSink for SharedText {
    fn set_text(&mut self, text: &str) {
        self.set(text);
    }
}
