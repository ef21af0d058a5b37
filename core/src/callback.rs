//! Shared closures with stable identity.
//!
//! A [`Callback`] is created once and handed out by cloning. Clones share the
//! same closure, and [`Callback::ptr_eq`] tells whether two handles came from
//! the same creation. Memoized consumers compare callbacks by identity, so a
//! callback rebuilt on every render defeats their cache while a stored one
//! does not.

use std::fmt;
use std::rc::Rc;

/// Shared closure mapping `In` to `Out`
///
/// # Example
///
/// ```
/// use todo_widget_core::callback::Callback;
///
/// let double = Callback::new(|n: i32| n * 2);
/// let handle = double.clone();
///
/// assert_eq!(handle.call(21), 42);
/// assert!(double.ptr_eq(&handle));
/// assert!(!double.ptr_eq(&Callback::new(|n: i32| n * 2)));
/// ```
pub struct Callback<In, Out = ()> {
    f: Rc<dyn Fn(In) -> Out>,
}

impl<In, Out> Callback<In, Out> {
    /// Wraps a closure in a new identity
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(In) -> Out + 'static,
    {
        Self { f: Rc::new(f) }
    }

    /// Invokes the closure
    pub fn call(&self, input: In) -> Out {
        (self.f)(input)
    }

    /// Returns true if both handles share the same closure
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

impl<In, Out> Clone for Callback<In, Out> {
    fn clone(&self) -> Self {
        Self {
            f: Rc::clone(&self.f),
        }
    }
}

impl<In, Out> PartialEq for Callback<In, Out> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<In, Out> Eq for Callback<In, Out> {}

impl<In, Out> fmt::Debug for Callback<In, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback")
            .field(&Rc::as_ptr(&self.f).cast::<()>())
            .finish()
    }
}
