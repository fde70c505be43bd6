//! Observable values.
//!
//! A [`Property`] notifies its listeners synchronously whenever its value
//! changes. A [`RewindableProperty`] additionally remembers the value it was
//! created with and the last explicitly saved value, so it can be reset or
//! rewound independently.

use std::fmt;

/// Identifies a listener registered on a [`Property`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u32);

/// Callback invoked with `(new, old)` after a value changes.
///
/// Listeners must not try to mutate the property they observe.
pub type Listener<T> = Box<dyn FnMut(&T, &T)>;

/// A value that notifies subscribers when it changes
pub struct Property<T> {
    value: T,
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_listener: u32,
}

impl<T: Clone + PartialEq> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
            next_listener: 1,
        }
    }

    /// Returns a copy of the current value
    #[inline]
    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Returns a reference to the current value
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Sets the value, notifying listeners if it changed
    pub fn set(&mut self, value: T) {
        if self.value == value {
            return;
        }
        let old = std::mem::replace(&mut self.value, value);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.value, &old);
        }
    }

    /// Registers a listener and returns the id needed to remove it
    pub fn subscribe(&mut self, listener: Listener<T>) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Removes a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Subscription access that cannot change the value
    pub fn observer(&mut self) -> Observer<'_, T> {
        Observer { property: self }
    }
}

/// Listener registration on a property owned by someone else.
///
/// Writes stay with the owner, which validates them and keeps derived state
/// in step.
pub struct Observer<'a, T> {
    property: &'a mut Property<T>,
}

impl<T: Clone + PartialEq> Observer<'_, T> {
    pub fn get(&self) -> T {
        self.property.get()
    }

    pub fn subscribe(&mut self, listener: Listener<T>) -> ListenerId {
        self.property.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.property.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.property.listener_count()
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A [`Property`] with a construction-time value and a rewind point.
///
/// `set` never moves the rewind point; only [`save`](Self::save) and
/// [`reset`](Self::reset) do.
pub struct RewindableProperty<T> {
    property: Property<T>,
    initial: T,
    rewind_value: T,
}

impl<T: Clone + PartialEq> RewindableProperty<T> {
    pub fn new(value: T) -> Self {
        Self {
            initial: value.clone(),
            rewind_value: value.clone(),
            property: Property::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> T {
        self.property.get()
    }

    #[inline]
    pub fn value(&self) -> &T {
        self.property.value()
    }

    pub fn set(&mut self, value: T) {
        self.property.set(value);
    }

    /// Restores the construction-time value and re-anchors the rewind point there
    pub fn reset(&mut self) {
        self.rewind_value = self.initial.clone();
        self.property.set(self.initial.clone());
    }

    /// Anchors the current value as the rewind point
    pub fn save(&mut self) {
        self.rewind_value = self.property.get();
    }

    /// Restores the value stored by the last [`save`](Self::save)
    pub fn rewind(&mut self) {
        self.property.set(self.rewind_value.clone());
    }

    pub fn initial_value(&self) -> &T {
        &self.initial
    }

    pub fn rewind_value(&self) -> &T {
        &self.rewind_value
    }

    /// True when the current value is not the construction-time value
    pub fn differs_from_initial(&self) -> bool {
        *self.property.value() != self.initial
    }

    pub fn subscribe(&mut self, listener: Listener<T>) -> ListenerId {
        self.property.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.property.unsubscribe(id)
    }

    pub fn observer(&mut self) -> Observer<'_, T> {
        self.property.observer()
    }
}

impl<T: fmt::Debug> fmt::Debug for RewindableProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewindableProperty")
            .field("value", &self.property.value)
            .field("initial", &self.initial)
            .field("rewind_value", &self.rewind_value)
            .finish()
    }
}
