#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

use std::fmt;

/// Role a body plays in a preset; the view layer picks a renderer from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
    Satellite,
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
            BodyKind::Moon => "moon",
            BodyKind::Satellite => "satellite",
        };
        f.write_str(name)
    }
}
