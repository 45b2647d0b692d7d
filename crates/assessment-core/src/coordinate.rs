//! Positions in the canonical (unfiltered) section/item/instance tree.

use std::fmt;

/// Canonical position of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemCoord {
    pub section: usize,
    pub item: usize,
}

impl ItemCoord {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    pub const fn instance(self, instance: usize) -> InstanceCoord {
        InstanceCoord {
            section: self.section,
            item: self.item,
            instance,
        }
    }
}

impl fmt::Display for ItemCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.section, self.item)
    }
}

/// Canonical position of an instance. Positions shift when a preceding
/// instance is removed; use the instance id for anything that must survive edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceCoord {
    pub section: usize,
    pub item: usize,
    pub instance: usize,
}

impl InstanceCoord {
    pub const fn new(section: usize, item: usize, instance: usize) -> Self {
        Self {
            section,
            item,
            instance,
        }
    }

    pub const fn item_coord(self) -> ItemCoord {
        ItemCoord {
            section: self.section,
            item: self.item,
        }
    }
}

impl fmt::Display for InstanceCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}:{}]", self.section, self.item, self.instance)
    }
}
