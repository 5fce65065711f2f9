use crate::tables::*;

use glam::Vec3A;
use rand::Rng;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// One of the 8 octants of 3D space relative to some center.
///
/// Encoding: bit 0 = X sign, bit 1 = Y sign, bit 2 = Z sign, where a set bit
/// means positive.
///
/// ```text
/// 0 (000) -> (-, -, -)    4 (100) -> (-, -, +)
/// 1 (001) -> (+, -, -)    5 (101) -> (+, -, +)
/// 2 (010) -> (-, +, -)    6 (110) -> (-, +, +)
/// 3 (011) -> (+, +, -)    7 (111) -> (+, +, +)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OctantCode(u8);

/// How two cube vertices are connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    Same,
    Edge,
    FaceDiagonal,
    SpaceDiagonal,
}

impl OctantCode {
    pub const ORIGIN: Self = Self(0);
    pub const SOUTH_WEST_LOW: Self = Self(0);
    pub const SOUTH_EAST_LOW: Self = Self(1);
    pub const NORTH_WEST_LOW: Self = Self(2);
    pub const NORTH_EAST_LOW: Self = Self(3);
    pub const SOUTH_WEST_HIGH: Self = Self(4);
    pub const SOUTH_EAST_HIGH: Self = Self(5);
    pub const NORTH_WEST_HIGH: Self = Self(6);
    pub const NORTH_EAST_HIGH: Self = Self(7);
    pub const MAXIMUM: Self = Self(7);

    pub const ALL: [Self; 8] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
    ];

    /// Masks `raw` to its low 3 bits. Never rejects.
    #[inline]
    pub const fn new(raw: u8) -> Self {
        Self(raw & 0b111)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn from_signs(x_positive: bool, y_positive: bool, z_positive: bool) -> Self {
        Self((z_positive as u8) << 2 | (y_positive as u8) << 1 | x_positive as u8)
    }

    /// The octant of `position` relative to `center`. Each axis is compared
    /// independently; a coordinate equal to the center counts as positive.
    #[inline]
    pub fn from_position(position: Vec3A, center: Vec3A) -> Self {
        Self::new(position.cmpge(center).bitmask() as u8)
    }

    /// Octant of `(x, y, z)` relative to the origin.
    #[inline]
    pub fn from_coords(x: f32, y: f32, z: f32) -> Self {
        Self::from_signs(x >= 0.0, y >= 0.0, z >= 0.0)
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self(rng.random_range(0..8))
    }

    #[inline]
    pub const fn x_sign(self) -> bool {
        self.0 & 0b001 != 0
    }

    #[inline]
    pub const fn y_sign(self) -> bool {
        self.0 & 0b010 != 0
    }

    #[inline]
    pub const fn z_sign(self) -> bool {
        self.0 & 0b100 != 0
    }

    #[inline]
    pub const fn x_coord(self) -> i8 {
        sign_to_coord(self.x_sign())
    }

    #[inline]
    pub const fn y_coord(self) -> i8 {
        sign_to_coord(self.y_sign())
    }

    #[inline]
    pub const fn z_coord(self) -> i8 {
        sign_to_coord(self.z_sign())
    }

    /// Vertex coordinates in `{-1, +1}^3`.
    #[inline]
    pub const fn signs(self) -> [i8; 3] {
        [self.x_coord(), self.y_coord(), self.z_coord()]
    }

    pub fn rotate_x(self, angle_degrees: i32) -> Self {
        Self(ROTATE_X[self.0 as usize][quarter_turns(angle_degrees)])
    }

    pub fn rotate_y(self, angle_degrees: i32) -> Self {
        Self(ROTATE_Y[self.0 as usize][quarter_turns(angle_degrees)])
    }

    pub fn rotate_z(self, angle_degrees: i32) -> Self {
        Self(ROTATE_Z[self.0 as usize][quarter_turns(angle_degrees)])
    }

    /// Reflect across the XY plane (negate Z).
    #[inline]
    pub const fn reflect_xy(self) -> Self {
        Self(self.0 ^ 0b100)
    }

    /// Reflect across the XZ plane (negate Y).
    #[inline]
    pub const fn reflect_xz(self) -> Self {
        Self(self.0 ^ 0b010)
    }

    /// Reflect across the YZ plane (negate X).
    #[inline]
    pub const fn reflect_yz(self) -> Self {
        Self(self.0 ^ 0b001)
    }

    /// Negate all coordinates.
    #[inline]
    pub const fn invert(self) -> Self {
        Self(self.0 ^ 0b111)
    }

    /// The space-diagonal neighbor.
    #[inline]
    pub const fn opposite(self) -> Self {
        self.invert()
    }

    #[inline]
    pub const fn hamming_distance(self, other: Self) -> u8 {
        (self.0 ^ other.0).count_ones() as u8
    }

    /// Distance between the two cube vertices.
    ///
    /// Vertices sit at `{-0.5, +0.5}^3` by default, or at `{-1, +1}^3` when
    /// `unit_cube` is set.
    pub fn euclidean_distance(self, other: Self, unit_cube: bool) -> f32 {
        let base = (self.hamming_distance(other) as f32).sqrt();
        if unit_cube {
            2.0 * base
        } else {
            base
        }
    }

    pub const fn connection_type(self, other: Self) -> ConnectionType {
        match self.hamming_distance(other) {
            0 => ConnectionType::Same,
            1 => ConnectionType::Edge,
            2 => ConnectionType::FaceDiagonal,
            _ => ConnectionType::SpaceDiagonal,
        }
    }

    /// The 3 vertices sharing a cube edge with this one, flipping X, Y, then Z.
    pub fn edge_neighbors(self) -> [Self; 3] {
        EDGE_NEIGHBOR_MASKS.map(|m| Self(self.0 ^ m))
    }

    /// The 3 vertices across a face diagonal, flipping XY, XZ, then YZ.
    pub fn face_neighbors(self) -> [Self; 3] {
        FACE_DIAGONAL_MASKS.map(|m| Self(self.0 ^ m))
    }
}

#[inline]
const fn sign_to_coord(positive: bool) -> i8 {
    if positive {
        1
    } else {
        -1
    }
}

/// Index of the quarter turn nearest below `angle_degrees`, after normalizing
/// into `[0, 360)`.
#[inline]
fn quarter_turns(angle_degrees: i32) -> usize {
    (angle_degrees.rem_euclid(360) / 90) as usize
}

impl From<u8> for OctantCode {
    fn from(raw: u8) -> Self {
        Self::new(raw)
    }
}

impl From<OctantCode> for u8 {
    fn from(o: OctantCode) -> Self {
        o.0
    }
}

impl Add<i32> for OctantCode {
    type Output = Self;

    fn add(self, delta: i32) -> Self {
        Self(((self.0 as i32 + delta.rem_euclid(8)) % 8) as u8)
    }
}

impl Sub<i32> for OctantCode {
    type Output = Self;

    fn sub(self, delta: i32) -> Self {
        Self(((self.0 as i32 + 8 - delta.rem_euclid(8)) % 8) as u8)
    }
}

impl AddAssign<i32> for OctantCode {
    fn add_assign(&mut self, delta: i32) {
        *self = *self + delta;
    }
}

impl SubAssign<i32> for OctantCode {
    fn sub_assign(&mut self, delta: i32) {
        *self = *self - delta;
    }
}

impl fmt::Display for OctantCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for positive in [self.x_sign(), self.y_sign(), self.z_sign()] {
            f.write_str(if positive { "+" } else { "-" })?;
        }
        Ok(())
    }
}
