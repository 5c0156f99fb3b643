//! Enumerated attributes of content entities
//!
//! Every enum is stored in the database as its canonical capitalized name and
//! parses case-insensitively, so seed documents may write `"loop"` or `"Loop"`.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

macro_rules! content_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Canonical database representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            /// Get all available variants
            pub fn all_variants() -> &'static [$name] {
                &[$($name::$variant),+]
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::all_variants()
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| Error::InvalidInput(format!("'{}' is not a valid {}", s, $kind)))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

content_enum!(
    /// Role granted to a user
    UserRoleType,
    "role",
    [Internal, Admin, User, Artist, Engineer, Banned]
);

content_enum!(
    /// Position of a program in the composition hierarchy
    ///
    /// Macro programs pick the overall arc, Main programs carry harmony,
    /// Rhythm and Detail programs carry voiced patterns.
    ProgramType,
    "type",
    [Macro, Main, Rhythm, Detail]
);

content_enum!(
    /// Publication state of a program
    ProgramState,
    "state",
    [Draft, Published]
);

content_enum!(
    /// Sound source category, shared by instruments and program voices
    InstrumentType,
    "type",
    [Percussive, Harmonic, Melodic, Pad]
);

content_enum!(
    /// Publication state of an instrument
    InstrumentState,
    "state",
    [Draft, Published]
);

content_enum!(
    /// Where a pattern plays within its sequence
    ProgramSequencePatternType,
    "type",
    [Intro, Loop, Outro]
);
