use crate::core::BodyHandle;
use crate::error::PhysicsError;
use crate::Result;

/// Insertion-ordered storage for the bodies of one engine.
///
/// Bodies are never removed: a scene's body set is fixed at construction, so
/// handles stay valid and iteration order (and with it the order in which
/// forces are summed) is deterministic.
#[derive(Debug)]
pub struct BodyStorage<T> {
    items: Vec<T>,
}

impl<T> Default for BodyStorage<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> BodyStorage<T> {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item to the storage and returns its handle
    pub fn add(&mut self, item: T) -> BodyHandle {
        let handle = BodyHandle(self.items.len() as u32);
        self.items.push(item);
        handle
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&T> {
        self.items.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut T> {
        self.items.get_mut(handle.index())
    }

    /// Gets a body by its handle, returning an error if not found
    pub fn get_body(&self, handle: BodyHandle) -> Result<&T> {
        self.get(handle).ok_or_else(|| not_found(handle))
    }

    /// Gets a mutable reference to a body by its handle, returning an error if not found
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut T> {
        self.get_mut(handle).ok_or_else(|| not_found(handle))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns all handles in insertion order
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        (0..self.items.len()).map(|i| BodyHandle(i as u32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &T)> + '_ {
        self.items.iter().enumerate().map(|(i, item)| (BodyHandle(i as u32), item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut T)> + '_ {
        self.items.iter_mut().enumerate().map(|(i, item)| (BodyHandle(i as u32), item))
    }
}

fn not_found(handle: BodyHandle) -> PhysicsError {
    PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle))
}
