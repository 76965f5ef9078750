//! Explicitly tracked remote properties

/// A property that may not have been fetched from the service yet.
///
/// Entities hold their remote properties in a `Resolution` instead of
/// fetching them behind the caller's back. Reading an unresolved property is
/// a cheap `None`; callers decide when to pay for a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<T>(Option<T>);

impl<T> Default for Resolution<T> {
    fn default() -> Self {
        Self::unresolved()
    }
}

impl<T> Resolution<T> {
    /// Not fetched yet
    pub const fn unresolved() -> Self {
        Resolution(None)
    }

    /// Already known, usually because a listing returned it
    pub const fn resolved(value: T) -> Self {
        Resolution(Some(value))
    }

    /// The resolved value, if any
    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Mutable access to the resolved value, if any
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.0.as_mut()
    }

    pub fn is_resolved(&self) -> bool {
        self.0.is_some()
    }

    /// Store a freshly fetched value and return a reference to it
    pub fn set(&mut self, value: T) -> &mut T {
        self.0.insert(value)
    }

    /// Drop the cached value
    pub fn invalidate(&mut self) {
        self.0 = None;
    }

    /// Return the resolved value, fetching it with `fetch` first if needed
    pub fn get_or_try_resolve<E, F>(&mut self, fetch: F) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        match self.0 {
            Some(ref mut value) => Ok(value),
            None => Ok(self.0.insert(fetch()?)),
        }
    }
}

impl<T> From<Option<T>> for Resolution<T> {
    fn from(value: Option<T>) -> Self {
        Resolution(value)
    }
}
