use crate::kind::*;
use crate::location::*;
use serde::{Deserialize, Serialize};

/// A planned structure position and whether a site has been placed for it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructPos {
    pub x: u8,
    pub y: u8,
    pub built: bool,
}

impl StructPos {
    pub fn unbuilt(location: Location) -> Self {
        StructPos {
            x: location.x(),
            y: location.y(),
            built: false,
        }
    }

    pub fn built(location: Location) -> Self {
        StructPos {
            built: true,
            ..StructPos::unbuilt(location)
        }
    }

    pub fn location(&self) -> Location {
        Location::from_xy(self.x, self.y)
    }
}

/// The base layout for one room: one slot list per structure kind.
///
/// Slots are keyed by (kind, x, y). Built state only moves from false to
/// true; the only way back is discarding the whole layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStructures {
    #[serde(default)]
    spawn: Vec<StructPos>,
    #[serde(default)]
    extension: Vec<StructPos>,
    #[serde(default)]
    container: Vec<StructPos>,
    #[serde(default)]
    tower: Vec<StructPos>,
    #[serde(default)]
    link: Vec<StructPos>,
    #[serde(default)]
    storage: Vec<StructPos>,
    #[serde(default)]
    road: Vec<StructPos>,
    #[serde(default)]
    wall: Vec<StructPos>,
    #[serde(default)]
    rampart: Vec<StructPos>,
}

impl BaseStructures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self, kind: StructureKind) -> &[StructPos] {
        match kind {
            StructureKind::Spawn => &self.spawn,
            StructureKind::Extension => &self.extension,
            StructureKind::Container => &self.container,
            StructureKind::Tower => &self.tower,
            StructureKind::Link => &self.link,
            StructureKind::Storage => &self.storage,
            StructureKind::Road => &self.road,
            StructureKind::Wall => &self.wall,
            StructureKind::Rampart => &self.rampart,
        }
    }

    fn slots_mut(&mut self, kind: StructureKind) -> &mut Vec<StructPos> {
        match kind {
            StructureKind::Spawn => &mut self.spawn,
            StructureKind::Extension => &mut self.extension,
            StructureKind::Container => &mut self.container,
            StructureKind::Tower => &mut self.tower,
            StructureKind::Link => &mut self.link,
            StructureKind::Storage => &mut self.storage,
            StructureKind::Road => &mut self.road,
            StructureKind::Wall => &mut self.wall,
            StructureKind::Rampart => &mut self.rampart,
        }
    }

    /// Add a slot unless one already exists for the same tile. Returns
    /// whether the slot was added.
    pub fn insert(&mut self, kind: StructureKind, slot: StructPos) -> bool {
        let slots = self.slots_mut(kind);
        if slots.iter().any(|s| s.x == slot.x && s.y == slot.y) {
            return false;
        }
        slots.push(slot);
        true
    }

    pub fn extend(&mut self, kind: StructureKind, slots: impl IntoIterator<Item = StructPos>) {
        for slot in slots {
            self.insert(kind, slot);
        }
    }

    pub fn get(&self, kind: StructureKind, location: Location) -> Option<StructPos> {
        self.slots(kind)
            .iter()
            .find(|s| s.location() == location)
            .copied()
    }

    /// Replace the slot at (kind, location) with a built copy. Unknown keys
    /// and already-built slots are left alone. Returns whether anything changed.
    pub fn mark_built(&mut self, kind: StructureKind, location: Location) -> bool {
        let slots = self.slots_mut(kind);
        match slots.iter().position(|s| s.location() == location) {
            Some(index) if !slots[index].built => {
                slots[index] = StructPos::built(location);
                true
            }
            _ => false,
        }
    }

    /// Every slot across all kinds, in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (StructureKind, &StructPos)> + '_ {
        StructureKind::ALL
            .into_iter()
            .flat_map(move |kind| self.slots(kind).iter().map(move |slot| (kind, slot)))
    }

    /// Keys of every slot still waiting for a construction site.
    pub fn unbuilt(&self) -> Vec<(StructureKind, Location)> {
        self.iter()
            .filter(|(_, slot)| !slot.built)
            .map(|(kind, slot)| (kind, slot.location()))
            .collect()
    }

    pub fn count(&self, kind: StructureKind) -> usize {
        self.slots(kind).len()
    }

    pub fn built_count(&self, kind: StructureKind) -> usize {
        self.slots(kind).iter().filter(|s| s.built).count()
    }

    pub fn len(&self) -> usize {
        StructureKind::ALL.into_iter().map(|kind| self.count(kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// True iff at least one slot in any category still needs building.
pub fn should_build_structures(layout: &BaseStructures) -> bool {
    layout.iter().any(|(_, slot)| !slot.built)
}
