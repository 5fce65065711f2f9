/// Pairs of octants (o0, o1) where o0 and o1 are face-adjacent.
///
/// Flattened in axis-major order, these are also the 12 cube edges indexed
/// by phase: phase `4 * axis + i` connects `FACE_ADJACENT_OCTANTS[axis][i]`.
pub const FACE_ADJACENT_OCTANTS: [[[u8; 2]; 4]; 3] = [
    [
        //  -X     +X
        [0b000, 0b001],
        [0b010, 0b011],
        [0b100, 0b101],
        [0b110, 0b111],
    ],
    [
        //  -Y     +Y
        [0b000, 0b010],
        [0b001, 0b011],
        [0b100, 0b110],
        [0b101, 0b111],
    ],
    [
        //  -Z     +Z
        [0b000, 0b100],
        [0b001, 0b101],
        [0b010, 0b110],
        [0b011, 0b111],
    ],
];

// Quarter-turn permutations of the cube vertices.
// Format: [input octant][angle / 90] = output octant
pub const ROTATE_X: [[u8; 4]; 8] = [
    // 0°  90° 180° 270°
    [0, 2, 4, 6], // ---
    [1, 3, 5, 7], // +--
    [2, 4, 6, 0], // -+-
    [3, 5, 7, 1], // ++-
    [4, 6, 0, 2], // --+
    [5, 7, 1, 3], // +-+
    [6, 0, 2, 4], // -++
    [7, 1, 3, 5], // +++
];

pub const ROTATE_Y: [[u8; 4]; 8] = [
    [0, 1, 4, 5],
    [1, 4, 5, 0],
    [2, 3, 6, 7],
    [3, 6, 7, 2],
    [4, 5, 0, 1],
    [5, 0, 1, 4],
    [6, 7, 2, 3],
    [7, 2, 3, 6],
];

pub const ROTATE_Z: [[u8; 4]; 8] = [
    [0, 2, 3, 1],
    [1, 0, 2, 3],
    [2, 3, 1, 0],
    [3, 1, 0, 2],
    [4, 6, 7, 5],
    [5, 4, 6, 7],
    [6, 7, 5, 4],
    [7, 5, 4, 6],
];

/// XOR masks reaching the 3 edge-adjacent vertices (flip X, Y, Z).
pub const EDGE_NEIGHBOR_MASKS: [u8; 3] = [0b001, 0b010, 0b100];

/// XOR masks reaching the 3 face-diagonal vertices (flip XY, XZ, YZ).
pub const FACE_DIAGONAL_MASKS: [u8; 3] = [0b011, 0b101, 0b110];
