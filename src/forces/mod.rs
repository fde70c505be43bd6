mod gravity;
mod pair;

pub use self::gravity::{AccelerationField, NewtonianGravity};
pub use self::pair::{all_pairs, Pair};
