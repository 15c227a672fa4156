use crate::constants::*;
use serde::*;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Location {
    packed: u16,
}

impl Location {
    pub fn from_coords(x: u32, y: u32) -> Self {
        Location {
            packed: ((x << 8) | y) as u16,
        }
    }

    #[inline]
    pub fn from_xy(x: u8, y: u8) -> Self {
        Self::from_coords(x as u32, y as u32)
    }

    /// Build a location from signed coordinates, rejecting anything outside the room.
    pub fn checked_from_i16(x: i16, y: i16) -> Option<Self> {
        if (0..ROOM_WIDTH as i16).contains(&x) && (0..ROOM_HEIGHT as i16).contains(&y) {
            Some(Self::from_xy(x as u8, y as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.packed >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        (self.packed & 0xFF) as u8
    }

    /// Offset by `(dx, dy)`; `None` if the result leaves the room.
    pub fn checked_add(self, dx: i8, dy: i8) -> Option<Self> {
        Self::checked_from_i16(self.x() as i16 + dx as i16, self.y() as i16 + dy as i16)
    }

    /// True for tiles that are not on the room border.
    pub fn is_interior(self) -> bool {
        (1..ROOM_WIDTH - 1).contains(&self.x()) && (1..ROOM_HEIGHT - 1).contains(&self.y())
    }

    #[inline]
    pub fn index(self) -> usize {
        self.y() as usize * ROOM_WIDTH as usize + self.x() as usize
    }

    #[inline]
    pub fn packed_repr(self) -> u16 {
        self.packed
    }

    #[inline]
    pub fn from_packed(packed: u16) -> Self {
        Location { packed }
    }

    pub fn distance_to(self, other: Self) -> u8 {
        let dx = (self.x() as i8) - (other.x() as i8);
        let dy = (self.y() as i8) - (other.y() as i8);

        dx.abs().max(dy.abs()) as u8
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x(), self.y())
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.packed_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u16::deserialize(deserializer).map(Location::from_packed)
    }
}
