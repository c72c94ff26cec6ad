//! Dense handle table mapping module-visible integers to host objects.
//!
//! Handles are allocated sequentially starting at 1, so a `Vec` indexed by
//! handle value gives O(1) lookup. Handle 0 is reserved for "null". Values
//! are never reused: a released slot stays empty for the rest of the session,
//! which keeps stale handles from silently resolving to a newer object.

#[cfg(test)]
mod tests;

use easel_shared::Handle;

/// Teardown hook run exactly once when an object is released
pub trait Dispose {
    fn dispose(self);
}

/// Monotonic handle registry
#[derive(Debug)]
pub struct HandleRegistry<T: Dispose> {
    slots: Vec<Option<T>>,
    live: usize,
}

impl<T: Dispose> HandleRegistry<T> {
    pub fn new() -> Self {
        Self {
            // Slot 0 is the permanently empty null handle
            slots: vec![None],
            live: 0,
        }
    }

    /// Store an object and return its new handle
    pub fn register(&mut self, object: T) -> Handle {
        let handle = self.slots.len() as Handle;
        self.slots.push(Some(object));
        self.live += 1;
        handle
    }

    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        if handle == 0 {
            return None;
        }
        self.slots.get(handle as usize)?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if handle == 0 {
            return None;
        }
        self.slots.get_mut(handle as usize)?.as_mut()
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Remove an object without disposing it (one-shot consumption)
    pub fn take(&mut self, handle: Handle) -> Option<T> {
        if handle == 0 {
            return None;
        }
        let object = self.slots.get_mut(handle as usize)?.take()?;
        self.live -= 1;
        Some(object)
    }

    /// Remove and dispose an object.
    ///
    /// Returns `false` for the null handle, unknown handles and handles that
    /// were already released or consumed; nothing is disposed in that case.
    pub fn release(&mut self, handle: Handle) -> bool {
        match self.take(handle) {
            Some(object) => {
                object.dispose();
                true
            }
            None => false,
        }
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Highest handle ever assigned (0 if none)
    pub fn high_water_mark(&self) -> Handle {
        (self.slots.len() - 1) as Handle
    }

    /// Live objects with their handles, in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|object| (i as Handle, object)))
    }

    /// Dispose every live object, newest first. Handle values keep counting
    /// from where they were.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut().rev() {
            if let Some(object) = slot.take() {
                object.dispose();
            }
        }
        self.live = 0;
    }
}

impl<T: Dispose> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
