use crate::{tables::FACE_ADJACENT_OCTANTS, Error, OctantCode, Result};

use rand::Rng;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Number of distinct phases in one cycle.
pub const NUM_PHASES: u8 = 12;

/// One of 12 positions on a circular temporal counter.
///
/// Each phase names one edge of the cube:
///
/// - `0..=3`: X-parallel edges
/// - `4..=7`: Y-parallel edges
/// - `8..=11`: Z-parallel edges
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhaseCode(u8);

/// A coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub const fn label(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }

    const fn from_index(i: usize) -> Self {
        match i {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }
}

/// A cube edge: two vertices differing in exactly the bit of `axis`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeEdge {
    pub from: OctantCode,
    pub to: OctantCode,
    pub axis: Axis,
}

impl CubeEdge {
    /// True if this edge joins `a` and `b`, in either order.
    pub fn connects(&self, a: OctantCode, b: OctantCode) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

impl PhaseCode {
    pub const MIDNIGHT: Self = Self(0);
    pub const DAWN: Self = Self(4);
    pub const NOON: Self = Self(6);
    pub const DUSK: Self = Self(9);

    pub const ALL: [Self; 12] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
        Self(9),
        Self(10),
        Self(11),
    ];

    /// Wraps `raw` modulo 12. Never rejects.
    #[inline]
    pub const fn new(raw: u8) -> Self {
        Self(raw % NUM_PHASES)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self(rng.random_range(0..NUM_PHASES))
    }

    #[inline]
    pub fn next(self) -> Self {
        self + 1
    }

    #[inline]
    pub fn prev(self) -> Self {
        self - 1
    }

    /// Advance by `n` phases; `n` may be negative.
    #[inline]
    pub fn advance(self, n: i32) -> Self {
        self + n
    }

    /// Pre-increment: step forward and return the new value.
    pub fn increment(&mut self) -> Self {
        *self = self.next();
        *self
    }

    /// Pre-decrement: step backward and return the new value.
    pub fn decrement(&mut self) -> Self {
        *self = self.prev();
        *self
    }

    /// Post-increment: step forward and return the previous value.
    pub fn post_increment(&mut self) -> Self {
        let old = *self;
        *self = self.next();
        old
    }

    /// Post-decrement: step backward and return the previous value.
    pub fn post_decrement(&mut self) -> Self {
        let old = *self;
        *self = self.prev();
        old
    }

    /// The axis group this phase belongs to. Fixed by convention.
    pub const fn axis(self) -> Axis {
        Axis::from_index(self.0 as usize / 4)
    }

    pub const fn is_x_parallel(self) -> bool {
        self.0 < 4
    }

    pub const fn is_y_parallel(self) -> bool {
        self.0 >= 4 && self.0 < 8
    }

    pub const fn is_z_parallel(self) -> bool {
        self.0 >= 8
    }

    /// Group of 3 consecutive phases, in `[0, 3]`.
    pub const fn quadrant(self) -> u8 {
        self.0 / 3
    }

    /// Clock-face rendering, e.g. `"07:00"`.
    pub fn to_clock(self) -> String {
        format!("{:02}:00", self.0)
    }

    /// 12 consecutive phases beginning at `start`.
    pub fn cycle(start: Self) -> [Self; 12] {
        let mut out = [start; 12];
        for (i, p) in out.iter_mut().enumerate() {
            *p = start + i as i32;
        }
        out
    }

    pub fn x_phases() -> [Self; 4] {
        [Self(0), Self(1), Self(2), Self(3)]
    }

    pub fn y_phases() -> [Self; 4] {
        [Self(4), Self(5), Self(6), Self(7)]
    }

    pub fn z_phases() -> [Self; 4] {
        [Self(8), Self(9), Self(10), Self(11)]
    }
}

impl From<u8> for PhaseCode {
    fn from(raw: u8) -> Self {
        Self::new(raw)
    }
}

impl From<PhaseCode> for u8 {
    fn from(p: PhaseCode) -> Self {
        p.0
    }
}

impl Add<i32> for PhaseCode {
    type Output = Self;

    fn add(self, delta: i32) -> Self {
        // Reduce first so extreme deltas cannot overflow.
        let n = NUM_PHASES as i32;
        Self(((self.0 as i32 + delta.rem_euclid(n)) % n) as u8)
    }
}

impl Sub<i32> for PhaseCode {
    type Output = Self;

    fn sub(self, delta: i32) -> Self {
        let n = NUM_PHASES as i32;
        Self(((self.0 as i32 + n - delta.rem_euclid(n)) % n) as u8)
    }
}

impl AddAssign<i32> for PhaseCode {
    fn add_assign(&mut self, delta: i32) {
        *self = *self + delta;
    }
}

impl SubAssign<i32> for PhaseCode {
    fn sub_assign(&mut self, delta: i32) {
        *self = *self - delta;
    }
}

impl fmt::Display for PhaseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Phase_{}", self.0)
    }
}

/// Shortest circular distance, in `[0, 6]`.
pub const fn phase_distance(a: PhaseCode, b: PhaseCode) -> u8 {
    let d = (b.0 + NUM_PHASES - a.0) % NUM_PHASES;
    if d <= 6 {
        d
    } else {
        NUM_PHASES - d
    }
}

pub const fn are_adjacent(a: PhaseCode, b: PhaseCode) -> bool {
    phase_distance(a, b) == 1
}

pub const fn are_opposite(a: PhaseCode, b: PhaseCode) -> bool {
    phase_distance(a, b) == 6
}

/// The cube edge named by `p`.
pub const fn phase_to_edge(p: PhaseCode) -> CubeEdge {
    let axis = p.0 as usize / 4;
    let [from, to] = FACE_ADJACENT_OCTANTS[axis][p.0 as usize % 4];
    CubeEdge {
        from: OctantCode::new(from),
        to: OctantCode::new(to),
        axis: Axis::from_index(axis),
    }
}

/// The phase whose edge joins `from` and `to`, in either order.
///
/// Fails with [`Error::NotAdjacent`] unless the octants differ in exactly one
/// bit.
pub fn edge_to_phase(from: OctantCode, to: OctantCode) -> Result<PhaseCode> {
    PhaseCode::ALL
        .into_iter()
        .find(|&p| phase_to_edge(p).connects(from, to))
        .ok_or(Error::NotAdjacent {
            from: from.value(),
            to: to.value(),
        })
}

/// The phase active at `time_s` for a cycle lasting `cycle_period_s`.
pub fn time_to_phase(time_s: f32, cycle_period_s: f32) -> PhaseCode {
    let phase_duration = cycle_period_s / NUM_PHASES as f32;
    let steps = (time_s / phase_duration) as u32;
    PhaseCode((steps % NUM_PHASES as u32) as u8)
}

/// Offset of the start of `p` within the cycle, in `[0, cycle_period_s)`.
pub fn phase_to_time(p: PhaseCode, cycle_period_s: f32) -> f32 {
    p.0 as f32 * cycle_period_s / NUM_PHASES as f32
}

/// Fraction of the current phase already elapsed, in `[0, 1)`.
pub fn phase_progress(time_s: f32, cycle_period_s: f32) -> f32 {
    let phase_duration = cycle_period_s / NUM_PHASES as f32;
    (time_s % phase_duration) / phase_duration
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn construction_wraps_modulo_twelve() {
        for raw in 0..=u8::MAX {
            assert_eq!(PhaseCode::new(raw).value(), raw % 12);
        }
        assert_eq!(PhaseCode::new(15).value(), 3);
    }

    #[test]
    fn circular_arithmetic() {
        let mut p = PhaseCode::new(11);
        assert_eq!(p.post_increment().value(), 11);
        assert_eq!(p.value(), 0);
        assert_eq!(p.decrement().value(), 11);
        assert_eq!(p.increment().value(), 0);
        assert_eq!(p.post_decrement().value(), 0);
        assert_eq!(p.value(), 11);

        assert_eq!((PhaseCode::new(3) - 5).value(), 10);
        assert_eq!((PhaseCode::new(3) + 25).value(), 4);
        assert_eq!(PhaseCode::new(0).advance(-13).value(), 11);

        let mut q = PhaseCode::new(6);
        q += 7;
        assert_eq!(q.value(), 1);
        q -= 2;
        assert_eq!(q.value(), 11);
    }

    #[test]
    fn arithmetic_wraps_for_extreme_deltas() {
        // i32::MAX = 7 (mod 12), i32::MIN = 4 (mod 12).
        assert_eq!((PhaseCode::new(5) + i32::MAX).value(), 0);
        assert_eq!((PhaseCode::new(5) - i32::MAX).value(), 10);
        assert_eq!((PhaseCode::new(0) + i32::MIN).value(), 4);
        assert_eq!((PhaseCode::new(0) - i32::MIN).value(), 8);
        assert_eq!(PhaseCode::new(11).advance(i32::MIN).value(), 3);

        let mut p = PhaseCode::new(3);
        p += i32::MAX;
        p -= i32::MAX;
        assert_eq!(p.value(), 3);
        assert_eq!(PhaseCode::cycle(PhaseCode::new(2))[11].value(), 1);
    }

    #[test]
    fn axis_groups() {
        for p in PhaseCode::ALL {
            let flags = [p.is_x_parallel(), p.is_y_parallel(), p.is_z_parallel()];
            assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
            assert!(flags[p.axis().index()]);
            assert_eq!(phase_to_edge(p).axis, p.axis());
        }
        assert_eq!(PhaseCode::x_phases().map(|p| p.axis()), [Axis::X; 4]);
        assert_eq!(PhaseCode::y_phases().map(|p| p.axis()), [Axis::Y; 4]);
        assert_eq!(PhaseCode::z_phases().map(|p| p.axis()), [Axis::Z; 4]);
        assert_eq!(PhaseCode::new(11).quadrant(), 3);
        assert_eq!(PhaseCode::new(5).quadrant(), 1);
    }

    #[test]
    fn distances() {
        for p in PhaseCode::ALL {
            assert_eq!(phase_distance(p, p), 0);
            assert_eq!(phase_distance(p, p + 6), 6);
            assert!(are_opposite(p, p + 6));
            assert!(are_adjacent(p, p.next()));
            assert!(are_adjacent(p, p.prev()));
        }
        assert_eq!(phase_distance(PhaseCode::new(0), PhaseCode::new(3)), 3);
        assert_eq!(phase_distance(PhaseCode::new(0), PhaseCode::new(9)), 3);
        assert!(are_adjacent(PhaseCode::new(11), PhaseCode::new(0)));
        assert!(!are_adjacent(PhaseCode::new(0), PhaseCode::new(5)));
    }

    #[test]
    fn edge_table_is_exact() {
        let expected: [(u8, u8, char); 12] = [
            (0, 1, 'X'),
            (2, 3, 'X'),
            (4, 5, 'X'),
            (6, 7, 'X'),
            (0, 2, 'Y'),
            (1, 3, 'Y'),
            (4, 6, 'Y'),
            (5, 7, 'Y'),
            (0, 4, 'Z'),
            (1, 5, 'Z'),
            (2, 6, 'Z'),
            (3, 7, 'Z'),
        ];
        for (p, (from, to, axis)) in PhaseCode::ALL.into_iter().zip(expected) {
            let edge = phase_to_edge(p);
            assert_eq!(edge.from.value(), from);
            assert_eq!(edge.to.value(), to);
            assert_eq!(edge.axis.label(), axis);
            assert_eq!(edge.from.hamming_distance(edge.to), 1);
        }
    }

    #[test]
    fn edge_round_trip_for_every_adjacent_pair() {
        for a in OctantCode::ALL {
            for b in OctantCode::ALL {
                let result = edge_to_phase(a, b);
                if a.hamming_distance(b) == 1 {
                    let edge = phase_to_edge(result.unwrap());
                    assert!(edge.connects(a, b));
                } else {
                    assert_eq!(
                        result,
                        Err(Error::NotAdjacent {
                            from: a.value(),
                            to: b.value()
                        })
                    );
                }
            }
        }
        assert!(edge_to_phase(OctantCode::new(0), OctantCode::new(7)).is_err());
        assert_eq!(
            edge_to_phase(OctantCode::new(4), OctantCode::new(0)),
            Ok(PhaseCode::new(8))
        );
    }

    #[test]
    fn temporal_helpers() {
        assert_eq!(time_to_phase(0.0, 12.0).value(), 0);
        assert_eq!(time_to_phase(6.0, 12.0).value(), 6);
        assert_eq!(time_to_phase(12.0, 12.0).value(), 0);
        assert_eq!(time_to_phase(25.5, 12.0).value(), 1);
        assert!((phase_to_time(PhaseCode::new(6), 12.0) - 6.0).abs() < 1e-4);
        assert!((phase_progress(6.5, 12.0) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn rendering() {
        assert_eq!(PhaseCode::new(7).to_string(), "Phase_7");
        assert_eq!(PhaseCode::new(7).to_clock(), "07:00");
        assert_eq!(PhaseCode::new(11).to_clock(), "11:00");
        let cycle = PhaseCode::cycle(PhaseCode::new(10));
        assert_eq!(cycle[0].value(), 10);
        assert_eq!(cycle[2].value(), 0);
        assert_eq!(cycle[11].value(), 9);
    }
}
