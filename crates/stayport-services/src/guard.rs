//! Navigation-safety capability.
//!
//! The edit form registers a dirty-check with its container; the container
//! asks `can_leave()` before navigating away. An explicit registered
//! capability, not a free-floating global.

use std::sync::Arc;

type DirtyCheck = dyn Fn() -> bool + Send + Sync;

#[derive(Clone, Default)]
pub struct NavigationGuard {
    dirty_check: Option<Arc<DirtyCheck>>,
}

impl NavigationGuard {
    pub fn new() -> Self {
        NavigationGuard::default()
    }

    /// Register the active form's dirty-check, replacing any prior one.
    pub fn register<F>(&mut self, dirty_check: F)
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.dirty_check = Some(Arc::new(dirty_check));
    }

    /// Drop the registration when the form goes away.
    pub fn release(&mut self) {
        self.dirty_check = None;
    }

    /// Safe to navigate when no form is registered or the form is clean.
    pub fn can_leave(&self) -> bool {
        match &self.dirty_check {
            Some(dirty) => !dirty(),
            None => true,
        }
    }
}
