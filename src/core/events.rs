use crate::core::BodyHandle;
use std::collections::VecDeque;

/// A collision detected during a physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// The first body in the collision
    pub body_a: BodyHandle,

    /// The second body in the collision
    pub body_b: BodyHandle,

    /// Simulation time at which the collision was detected
    pub time: f64,
}

/// Types of body events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEventType {
    /// A body has been added to the engine
    Added,

    /// The user dragged the body to a new position
    UserModifiedPosition,

    /// The user finished editing the body's velocity
    UserModifiedVelocity,

    /// The user changed the body's mass
    UserModifiedMass,

    /// The body has collided and become inert
    Collided,
}

/// An event related to a single body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyEvent {
    /// The type of body event
    pub event_type: BodyEventType,

    /// The body that the event refers to
    pub body: BodyHandle,
}

/// A queue of physics events
#[derive(Debug, Default)]
pub struct EventQueue {
    collision_events: VecDeque<CollisionEvent>,
    body_events: VecDeque<BodyEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_collision_event(&mut self, event: CollisionEvent) {
        self.collision_events.push_back(event);
    }

    pub fn add_body_event(&mut self, event: BodyEvent) {
        self.body_events.push_back(event);
    }

    /// Queues `event`, dropping any identical event still waiting
    pub fn replace_body_event(&mut self, event: BodyEvent) {
        self.body_events.retain(|e| *e != event);
        self.body_events.push_back(event);
    }

    pub fn body_event_count(&self) -> usize {
        self.body_events.len()
    }

    pub fn has_collision_events(&self) -> bool {
        !self.collision_events.is_empty()
    }

    pub fn has_body_events(&self) -> bool {
        !self.body_events.is_empty()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.collision_events.is_empty() && self.body_events.is_empty()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.collision_events.clear();
        self.body_events.clear();
    }

    /// Gets all body events of a specific type
    pub fn get_body_events_of_type(&self, event_type: BodyEventType) -> Vec<&BodyEvent> {
        self.body_events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Gets all collision events involving a specific body
    pub fn get_collision_events_for_body(&self, body: BodyHandle) -> Vec<&CollisionEvent> {
        self.collision_events
            .iter()
            .filter(|e| e.body_a == body || e.body_b == body)
            .collect()
    }
}
