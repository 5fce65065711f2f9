use crate::{Error, OctantCode, PhaseCode, Result};

use rand::distr::uniform::{SampleRange, SampleUniform};
use rand::Rng;
use std::array;
use std::fmt;
use std::ops::{Add, Index, IndexMut};

/// Dense 12×8 grid of cells keyed by `(PhaseCode, OctantCode)`.
///
/// Rows are phases and columns are octants. Every traversal visits cells in
/// row-major order: phase 0 octants 0..8, then phase 1, and so on. Visitors
/// may rely on that order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConfigMatrix<T> {
    cells: [[T; 8]; 12],
}

/// Which octant symmetry [`mirror_spatial`] applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MirrorAxis {
    /// Negate X ([`OctantCode::reflect_yz`]).
    X,
    /// Negate Y ([`OctantCode::reflect_xz`]).
    Y,
    /// Negate Z ([`OctantCode::reflect_xy`]).
    Z,
    /// Negate every axis ([`OctantCode::invert`]).
    All,
}

impl MirrorAxis {
    pub fn apply(self, o: OctantCode) -> OctantCode {
        match self {
            MirrorAxis::X => o.reflect_yz(),
            MirrorAxis::Y => o.reflect_xz(),
            MirrorAxis::Z => o.reflect_xy(),
            MirrorAxis::All => o.invert(),
        }
    }
}

/// Lossy conversion used by the floating point aggregates.
pub trait AsF32 {
    fn as_f32(&self) -> f32;
}

macro_rules! impl_as_f32 {
    ($($t:ty),*) => {
        $(
            impl AsF32 for $t {
                #[inline]
                fn as_f32(&self) -> f32 {
                    *self as f32
                }
            }
        )*
    };
}

impl_as_f32!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl AsF32 for bool {
    #[inline]
    fn as_f32(&self) -> f32 {
        *self as u8 as f32
    }
}

impl<T> ConfigMatrix<T> {
    pub const ROWS: usize = 12;
    pub const COLS: usize = 8;
    pub const SIZE: usize = 96;

    /// Every cell set to `T::default()`.
    pub fn new() -> Self
    where
        T: Default,
    {
        Self {
            cells: array::from_fn(|_| array::from_fn(|_| T::default())),
        }
    }

    pub fn filled(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            cells: array::from_fn(|_| array::from_fn(|_| value.clone())),
        }
    }

    /// Builds from exactly 96 values in row-major order.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Result<Self> {
        let values: Vec<T> = values.into_iter().collect();
        let got = values.len();
        let invalid = || Error::InvalidArgument {
            expected: Self::SIZE,
            got,
        };
        if got != Self::SIZE {
            return Err(invalid());
        }

        let mut values = values.into_iter();
        let rows = (0..Self::ROWS)
            .map(|_| <[T; 8]>::try_from(values.by_ref().take(Self::COLS).collect::<Vec<_>>()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        let cells = <[[T; 8]; 12]>::try_from(rows).map_err(|_| invalid())?;
        Ok(Self { cells })
    }

    pub fn random<R>(rng: &mut impl Rng, range: R) -> Self
    where
        T: SampleUniform,
        R: SampleRange<T> + Clone,
    {
        Self {
            cells: array::from_fn(|_| array::from_fn(|_| rng.random_range(range.clone()))),
        }
    }

    #[inline]
    pub fn get(&self, p: PhaseCode, o: OctantCode) -> &T {
        &self.cells[p.value() as usize][o.value() as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, p: PhaseCode, o: OctantCode) -> &mut T {
        &mut self.cells[p.value() as usize][o.value() as usize]
    }

    pub fn at(&self, phase: u8, octant: u8) -> Result<&T> {
        check_index(phase, octant)?;
        Ok(&self.cells[phase as usize][octant as usize])
    }

    pub fn at_mut(&mut self, phase: u8, octant: u8) -> Result<&mut T> {
        check_index(phase, octant)?;
        Ok(&mut self.cells[phase as usize][octant as usize])
    }

    /// The live 8 cells of phase `p`.
    #[inline]
    pub fn row(&self, p: PhaseCode) -> &[T; 8] {
        &self.cells[p.value() as usize]
    }

    #[inline]
    pub fn row_mut(&mut self, p: PhaseCode) -> &mut [T; 8] {
        &mut self.cells[p.value() as usize]
    }

    /// A snapshot of the 12 cells of octant `o`.
    pub fn column(&self, o: OctantCode) -> [T; 12]
    where
        T: Clone,
    {
        array::from_fn(|p| self.cells[p][o.value() as usize].clone())
    }

    pub fn as_rows(&self) -> &[[T; 8]; 12] {
        &self.cells
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for row in &mut self.cells {
            row.fill(value.clone());
        }
    }

    /// Reset every cell to `T::default()`.
    pub fn clear(&mut self)
    where
        T: Default,
    {
        for cell in self.cells.iter_mut().flatten() {
            *cell = T::default();
        }
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (PhaseCode, OctantCode, &T)> + '_ {
        self.cells.iter().enumerate().flat_map(|(p, row)| {
            row.iter()
                .enumerate()
                .map(move |(o, v)| (PhaseCode::new(p as u8), OctantCode::new(o as u8), v))
        })
    }

    /// Mutating visitor in row-major order.
    pub fn apply(&mut self, mut f: impl FnMut(PhaseCode, OctantCode, &mut T)) {
        for (p, row) in self.cells.iter_mut().enumerate() {
            for (o, v) in row.iter_mut().enumerate() {
                f(PhaseCode::new(p as u8), OctantCode::new(o as u8), v);
            }
        }
    }

    /// Read-only visitor in row-major order.
    pub fn visit(&self, mut f: impl FnMut(PhaseCode, OctantCode, &T)) {
        for (p, o, v) in self.iter() {
            f(p, o, v);
        }
    }

    /// Replace each cell with `f(phase, octant, &old)`, in row-major order.
    pub fn transform(&mut self, mut f: impl FnMut(PhaseCode, OctantCode, &T) -> T) {
        self.apply(|p, o, v| *v = f(p, o, v));
    }

    /// A new matrix of `f(phase, octant, &cell)`, in row-major order.
    pub fn map<U>(&self, mut f: impl FnMut(PhaseCode, OctantCode, &T) -> U) -> ConfigMatrix<U> {
        ConfigMatrix {
            cells: array::from_fn(|p| {
                array::from_fn(|o| {
                    f(
                        PhaseCode::new(p as u8),
                        OctantCode::new(o as u8),
                        &self.cells[p][o],
                    )
                })
            }),
        }
    }

    pub fn count_if(&self, mut pred: impl FnMut(&T) -> bool) -> usize {
        self.cells.iter().flatten().filter(|v| pred(*v)).count()
    }

    pub fn any_of(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        self.cells.iter().flatten().any(|v| pred(v))
    }

    pub fn all_of(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        self.cells.iter().flatten().all(|v| pred(v))
    }

    /// Left fold with `+` seeded at `T::default()`.
    pub fn sum(&self) -> T
    where
        T: Default + Clone + Add<Output = T>,
    {
        self.cells
            .iter()
            .flatten()
            .fold(T::default(), |acc, v| acc + v.clone())
    }

    pub fn average(&self) -> f32
    where
        T: AsF32,
    {
        self.cells.iter().flatten().map(AsF32::as_f32).sum::<f32>() / Self::SIZE as f32
    }

    pub fn min(&self) -> T
    where
        T: PartialOrd + Clone,
    {
        let mut result = &self.cells[0][0];
        for v in self.cells.iter().flatten() {
            if v < result {
                result = v;
            }
        }
        result.clone()
    }

    pub fn max(&self) -> T
    where
        T: PartialOrd + Clone,
    {
        let mut result = &self.cells[0][0];
        for v in self.cells.iter().flatten() {
            if v > result {
                result = v;
            }
        }
        result.clone()
    }
}

impl<T: Default> Default for ConfigMatrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Default + From<u8>> ConfigMatrix<T> {
    pub fn zeros() -> Self {
        Self::filled(T::from(0))
    }

    pub fn ones() -> Self {
        Self::filled(T::from(1))
    }

    /// Cell `(p, p mod 8)` is 1 for each phase, everything else 0.
    pub fn identity() -> Self {
        let mut m = Self::zeros();
        for p in PhaseCode::ALL {
            *m.get_mut(p, OctantCode::new(p.value())) = T::from(1);
        }
        m
    }
}

fn check_index(phase: u8, octant: u8) -> Result<()> {
    if phase as usize >= ConfigMatrix::<()>::ROWS || octant as usize >= ConfigMatrix::<()>::COLS {
        return Err(Error::IndexOutOfRange { phase, octant });
    }
    Ok(())
}

impl<T> Index<(PhaseCode, OctantCode)> for ConfigMatrix<T> {
    type Output = T;

    fn index(&self, (p, o): (PhaseCode, OctantCode)) -> &T {
        self.get(p, o)
    }
}

impl<T> IndexMut<(PhaseCode, OctantCode)> for ConfigMatrix<T> {
    fn index_mut(&mut self, (p, o): (PhaseCode, OctantCode)) -> &mut T {
        self.get_mut(p, o)
    }
}

impl<T: fmt::Display> fmt::Display for ConfigMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ConfigMatrix [")?;
        for (p, row) in self.cells.iter().enumerate() {
            f.write_str("  [")?;
            for (o, v) in row.iter().enumerate() {
                if o > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{v}")?;
            }
            f.write_str(if p + 1 < Self::ROWS { "],\n" } else { "]\n" })?;
        }
        f.write_str("]")
    }
}

/// The 12 values of octant `o`, one per phase.
pub fn temporal_profile<T: Clone>(m: &ConfigMatrix<T>, o: OctantCode) -> [T; 12] {
    m.column(o)
}

/// The 8 values of phase `p`, one per octant.
pub fn spatial_profile<T: Clone>(m: &ConfigMatrix<T>, p: PhaseCode) -> [T; 8] {
    m.row(p).clone()
}

/// Shift rows cyclically: row `p` of the result is row `p - shift` of `m`.
pub fn rotate_temporal<T: Clone>(m: &ConfigMatrix<T>, shift: i32) -> ConfigMatrix<T> {
    ConfigMatrix {
        cells: array::from_fn(|p| m.row(PhaseCode::new(p as u8) - shift).clone()),
    }
}

/// Move each value to the mirrored octant within its row.
pub fn mirror_spatial<T: Clone>(m: &ConfigMatrix<T>, axis: MirrorAxis) -> ConfigMatrix<T> {
    // Every mirror is an involution, so pulling from the mirrored octant is
    // the same as pushing to it.
    m.map(|p, o, _| m.get(p, axis.apply(o)).clone())
}

/// Pearson correlation over the 96 paired cells, in `[-1, 1]`.
///
/// Returns 0 when either matrix has zero variance.
pub fn correlation<T: AsF32>(a: &ConfigMatrix<T>, b: &ConfigMatrix<T>) -> f32 {
    let mean_a = a.average();
    let mean_b = b.average();

    let mut numerator = 0.0;
    let mut denom_a = 0.0;
    let mut denom_b = 0.0;
    for (va, vb) in a.cells.iter().flatten().zip(b.cells.iter().flatten()) {
        let da = va.as_f32() - mean_a;
        let db = vb.as_f32() - mean_b;
        numerator += da * db;
        denom_a += da * da;
        denom_b += db * db;
    }

    let denom = (denom_a * denom_b).sqrt();
    if denom > 0.0 {
        numerator / denom
    } else {
        0.0
    }
}
