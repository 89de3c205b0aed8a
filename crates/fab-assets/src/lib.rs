//! Resource lookup for bundled assets.
//!
//! Assets are registered up front under a numeric [`ResourceId`] and handed
//! out as raw encoded bytes; decoding is left to the consumer.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Identifier of a bundled resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

/// In-memory table of encoded resources.
#[derive(Default)]
pub struct AssetManager {
    resources: HashMap<ResourceId, Rc<[u8]>>,
}

impl AssetManager {
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }

    /// Registers `bytes` under `id`, replacing any previous entry.
    pub fn register(&mut self, id: ResourceId, bytes: impl Into<Rc<[u8]>>) {
        if self.resources.insert(id, bytes.into()).is_some() {
            log::debug!("resource {id} replaced");
        }
    }

    pub fn open(&self, id: ResourceId) -> Option<Rc<[u8]>> {
        self.resources.get(&id).cloned()
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.resources.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
