use crate::bodies::Body;
use crate::core::{BodyHandle, BodyStorage};
use crate::error::PhysicsError;
use crate::forces::NewtonianGravity;
use crate::Result;

/// An unordered pair of distinct bodies, used to report separation and the
/// force between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
    a: BodyHandle,
    b: BodyHandle,
}

impl Pair {
    /// Creates a pair; `(a, b)` and `(b, a)` compare equal
    pub fn new(a: BodyHandle, b: BodyHandle) -> Result<Self> {
        if a == b {
            return Err(PhysicsError::InvalidParameter(format!(
                "a pair needs two distinct bodies, got {:?} twice",
                a
            )));
        }
        Ok(Self { a: a.min(b), b: a.max(b) })
    }

    pub fn first(&self) -> BodyHandle {
        self.a
    }

    pub fn second(&self) -> BodyHandle {
        self.b
    }

    pub fn involves(&self, body: BodyHandle) -> bool {
        self.a == body || self.b == body
    }

    /// The member of the pair that is not `body`
    pub fn other(&self, body: BodyHandle) -> Option<BodyHandle> {
        if body == self.a {
            Some(self.b)
        } else if body == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Distance between the two centers
    pub fn distance(&self, bodies: &BodyStorage<Body>) -> Result<f64> {
        let a = bodies.get_body(self.a)?;
        let b = bodies.get_body(self.b)?;
        Ok(a.position().distance(&b.position()))
    }

    /// Magnitude of the gravitational force between the two bodies
    pub fn force_magnitude(
        &self,
        bodies: &BodyStorage<Body>,
        gravity: &NewtonianGravity,
    ) -> Result<f64> {
        let a = bodies.get_body(self.a)?;
        let b = bodies.get_body(self.b)?;
        Ok(gravity.force_magnitude(a.mass(), b.mass(), a.position().distance(&b.position())))
    }
}

/// Every unordered pair of the given handles, in storage order
pub fn all_pairs(handles: &[BodyHandle]) -> Vec<Pair> {
    let mut pairs = Vec::with_capacity(handles.len() * handles.len().saturating_sub(1) / 2);
    for (i, &a) in handles.iter().enumerate() {
        for &b in &handles[i + 1..] {
            if let Ok(pair) = Pair::new(a, b) {
                pairs.push(pair);
            }
        }
    }
    pairs
}
