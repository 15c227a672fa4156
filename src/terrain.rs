use crate::constants::*;
use crate::location::*;
use bitflags::*;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TerrainFlags: u8 {
        const NONE = 0;
        const WALL = 1;
        const SWAMP = 2;
    }
}

/// Raw terrain buffer in the engine's layout: one byte of `TerrainFlags`
/// per tile, row-major.
#[derive(Clone)]
pub struct FastRoomTerrain {
    buffer: Vec<u8>,
}

impl FastRoomTerrain {
    pub fn new(buffer: Vec<u8>) -> FastRoomTerrain {
        debug_assert_eq!(buffer.len(), ROOM_AREA);
        FastRoomTerrain { buffer }
    }

    /// A room with no walls and no swamp.
    pub fn plain() -> FastRoomTerrain {
        FastRoomTerrain::new(vec![TerrainFlags::NONE.bits(); ROOM_AREA])
    }

    /// Tiles outside the room read as wall.
    pub fn get_xy(&self, x: u8, y: u8) -> TerrainFlags {
        if x >= ROOM_WIDTH || y >= ROOM_HEIGHT {
            return TerrainFlags::WALL;
        }
        let index = (y as usize * ROOM_WIDTH as usize) + (x as usize);
        self.buffer
            .get(index)
            .map(|bits| TerrainFlags::from_bits_truncate(*bits))
            .unwrap_or(TerrainFlags::WALL)
    }

    pub fn is_wall(&self, x: u8, y: u8) -> bool {
        self.get_xy(x, y).contains(TerrainFlags::WALL)
    }

    pub fn is_wall_at(&self, loc: Location) -> bool {
        self.is_wall(loc.x(), loc.y())
    }

    pub fn is_swamp(&self, x: u8, y: u8) -> bool {
        self.get_xy(x, y).contains(TerrainFlags::SWAMP)
    }
}

/// A 50x50 array for room-sized data.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RoomDataArray<T: Copy> {
    data: Vec<T>,
}

impl<T: Copy> RoomDataArray<T> {
    pub fn new(initial: T) -> Self {
        RoomDataArray {
            data: vec![initial; ROOM_AREA],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        let index = y * (ROOM_WIDTH as usize) + x;
        &self.data[index]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let index = y * (ROOM_WIDTH as usize) + x;
        &mut self.data[index]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        *self.get_mut(x, y) = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        self.data.iter().enumerate().map(|(i, v)| {
            let x = i % (ROOM_WIDTH as usize);
            let y = i / (ROOM_WIDTH as usize);
            ((x, y), v)
        })
    }
}

impl<T: Copy + Serialize> Serialize for RoomDataArray<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.data.serialize(serializer)
    }
}

impl<'de, T: Copy + Deserialize<'de>> Deserialize<'de> for RoomDataArray<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = Vec::<T>::deserialize(deserializer)?;
        if data.len() != ROOM_AREA {
            return Err(serde::de::Error::custom("Invalid room data array size"));
        }
        Ok(RoomDataArray { data })
    }
}

/// Neighbor offsets for 8-directional movement.
pub const NEIGHBORS_8: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Orthogonal offsets in road-ring order: east, west, south, north.
pub const NEIGHBORS_4: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
