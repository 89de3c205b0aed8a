//! Testing utilities and harness for the floating action button

pub mod testing;

pub use testing::*;

pub mod prelude {
    pub use crate::testing::*;
}
