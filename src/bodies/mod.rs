mod body;
mod body_type;

pub use self::body::{path_capacity, Body, DragTarget, DEFAULT_MAX_PATH_LENGTH};
pub use self::body_type::BodyKind;

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Per-body switches that are not part of the rewindable state
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct BodyFlags: u32 {
            /// The user may change this body's mass
            const MASS_SETTABLE = 0x01;

            /// A position drag is in progress
            const USER_CONTROLLED_POSITION = 0x02;

            /// A velocity drag is in progress
            const USER_CONTROLLED_VELOCITY = 0x04;
        }
    }
}
