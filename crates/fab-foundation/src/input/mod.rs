pub mod dispatcher;
pub mod types;

pub use dispatcher::PointerDispatcher;
pub use types::{PointerEvent, PointerEventKind, PointerId};

pub mod prelude {
    pub use super::types::{PointerEvent, PointerEventKind, PointerId};
}
