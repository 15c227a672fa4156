use serde::{Deserialize, Serialize};

use screeps::constants::StructureType;

/// The closed set of structure kinds the base layout plans for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    Spawn,
    Extension,
    Container,
    Tower,
    Link,
    Storage,
    Road,
    Wall,
    Rampart,
}

impl StructureKind {
    /// Every kind, in the order the scheduler walks them.
    pub const ALL: [StructureKind; 9] = [
        StructureKind::Spawn,
        StructureKind::Extension,
        StructureKind::Container,
        StructureKind::Tower,
        StructureKind::Link,
        StructureKind::Storage,
        StructureKind::Road,
        StructureKind::Wall,
        StructureKind::Rampart,
    ];

    pub fn structure_type(self) -> StructureType {
        match self {
            StructureKind::Spawn => StructureType::Spawn,
            StructureKind::Extension => StructureType::Extension,
            StructureKind::Container => StructureType::Container,
            StructureKind::Tower => StructureType::Tower,
            StructureKind::Link => StructureType::Link,
            StructureKind::Storage => StructureType::Storage,
            StructureKind::Road => StructureType::Road,
            StructureKind::Wall => StructureType::Wall,
            StructureKind::Rampart => StructureType::Rampart,
        }
    }

    pub fn from_structure_type(structure_type: StructureType) -> Option<StructureKind> {
        StructureKind::ALL
            .into_iter()
            .find(|kind| kind.structure_type() == structure_type)
    }

    pub fn name(self) -> &'static str {
        match self {
            StructureKind::Spawn => "spawn",
            StructureKind::Extension => "extension",
            StructureKind::Container => "container",
            StructureKind::Tower => "tower",
            StructureKind::Link => "link",
            StructureKind::Storage => "storage",
            StructureKind::Road => "road",
            StructureKind::Wall => "wall",
            StructureKind::Rampart => "rampart",
        }
    }
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_type_mapping_is_reversible() {
        for kind in StructureKind::ALL {
            assert_eq!(StructureKind::from_structure_type(kind.structure_type()), Some(kind));
        }
        assert_eq!(StructureKind::from_structure_type(StructureType::Lab), None);
    }
}
