//! The two-tier memory hierarchy: ferrite core (FRAM) and magnetic drum.

use log::trace;

use crate::trit::Trit;
use crate::word::TritWord;

const FRAM_ROWS: usize = 81;
const FRAM_PAGES: usize = 2;
const FRAM_SHORT_CELLS: usize = FRAM_ROWS * FRAM_PAGES;

const DRUM_ZONES: usize = 72;
const DRUM_ROWS_PER_ZONE: usize = 54;
const DRUM_SHORT_CELLS: usize = DRUM_ZONES * DRUM_ROWS_PER_ZONE;

const SHORT_WIDTH: usize = 9;
const LONG_WIDTH: usize = 18;
const ADDR_WIDTH: usize = 5;

/// Ferrite core memory: 162 short (9-trit) cells as 81 rows x 2 pages.
#[derive(Clone)]
pub struct Fram {
    cells: Vec<TritWord>,
}

impl Fram {
    pub fn new() -> Self {
        Fram {
            cells: vec![TritWord::zero(SHORT_WIDTH); FRAM_SHORT_CELLS],
        }
    }

    /// Row index 0..80 from address trits `A(1:4)`.
    pub fn row_of(addr: &TritWord) -> usize {
        bal3_to_uint(&addr.slice(1, 4)) as usize
    }

    /// Page index (0 or 1) for a short access: page 0 when `A(5) <= 0`,
    /// page 1 when `A(5) > 0`.
    pub fn page_of(addr: &TritWord) -> usize {
        if addr.get_trit(ADDR_WIDTH as i64) == Trit::P {
            1
        } else {
            0
        }
    }

    #[inline]
    fn index(row: usize, page: usize) -> usize {
        row * FRAM_PAGES + page
    }

    /// `ld_short(A)`: the 9-trit word at `(row, page)` selected by `A`.
    pub fn ld_short(&self, addr: &TritWord) -> TritWord {
        let idx = Self::index(Self::row_of(addr), Self::page_of(addr));
        trace!("fram ld_short row={} page={}", Self::row_of(addr), Self::page_of(addr));
        self.cells[idx].clone()
    }

    /// `st_short(A, v)`: writes a 9-trit `v` to `(row, page)` selected by `A`.
    pub fn st_short(&mut self, addr: &TritWord, v: &TritWord) {
        let idx = Self::index(Self::row_of(addr), Self::page_of(addr));
        self.cells[idx] = v.aligned_to(SHORT_WIDTH);
    }

    /// `ld_long(A)`: concatenates page 0 (high 9 trits) with page 1 (low 9
    /// trits) at the row selected by `A`. Valid when `A(5) == -1`; the
    /// page trit of `A` is otherwise ignored here, by contract of the
    /// caller deciding short vs. long access.
    pub fn ld_long(&self, addr: &TritWord) -> TritWord {
        let row = Self::row_of(addr);
        let high = &self.cells[Self::index(row, 0)];
        let low = &self.cells[Self::index(row, 1)];
        let mut trits = Vec::with_capacity(LONG_WIDTH);
        trits.extend_from_slice(high.as_trits());
        trits.extend_from_slice(low.as_trits());
        TritWord::from_trits(trits)
    }

    /// `st_long(A, v)`: writes `v(1:9)` to page 0 and `v(10:18)` to page 1
    /// of the row selected by `A`.
    pub fn st_long(&mut self, addr: &TritWord, v: &TritWord) {
        let row = Self::row_of(addr);
        let v = v.aligned_to(LONG_WIDTH);
        self.cells[Self::index(row, 0)] = v.slice(1, 9);
        self.cells[Self::index(row, 1)] = v.slice(10, 18);
    }

    /// Linear short-cell index (row-major) for the drum zone-transfer ops.
    pub fn linear_index(addr: &TritWord) -> usize {
        Self::index(Self::row_of(addr), Self::page_of(addr))
    }

    /// A run of `DRUM_ROWS_PER_ZONE` consecutive short cells starting at
    /// the linear index named by `addr`, wrapping around the store.
    pub fn read_run(&self, addr: &TritWord) -> Vec<TritWord> {
        let start = Self::linear_index(addr);
        (0..DRUM_ROWS_PER_ZONE)
            .map(|i| self.cells[(start + i) % FRAM_SHORT_CELLS].clone())
            .collect()
    }

    /// Writes a run of cells back starting at the linear index named by
    /// `addr`, the inverse of [`Fram::read_run`].
    pub fn write_run(&mut self, addr: &TritWord, cells: &[TritWord]) {
        let start = Self::linear_index(addr);
        for (i, cell) in cells.iter().enumerate() {
            self.cells[(start + i) % FRAM_SHORT_CELLS] = cell.clone();
        }
    }

    pub fn rows(&self) -> usize {
        FRAM_ROWS
    }

    pub fn pages(&self) -> usize {
        FRAM_PAGES
    }

    pub fn cell_at(&self, row: usize, page: usize) -> &TritWord {
        &self.cells[Self::index(row, page)]
    }
}

impl Default for Fram {
    fn default() -> Self {
        Self::new()
    }
}

/// Magnetic drum: 72 zones x 54 short cells, whole-zone transfers only.
#[derive(Clone)]
pub struct Drum {
    cells: Vec<TritWord>,
}

impl Drum {
    pub fn new() -> Self {
        Drum {
            cells: vec![TritWord::zero(SHORT_WIDTH); DRUM_SHORT_CELLS],
        }
    }

    /// Maps the 4-trit `MB` zone selector onto `[0, DRUM_ZONES)`. `MB`'s
    /// native range (-40..+40, 81 values) is wider than the drum's 72
    /// zones; this wraps rather than faulting, per the "total within its
    /// domain" contract on memory operations.
    pub fn zone_of(mb: &TritWord) -> usize {
        let shifted = mb.to_int() + 40;
        (shifted.rem_euclid(DRUM_ZONES as i64)) as usize
    }

    fn zone_slice(&self, zone: usize) -> &[TritWord] {
        let start = zone * DRUM_ROWS_PER_ZONE;
        &self.cells[start..start + DRUM_ROWS_PER_ZONE]
    }

    fn zone_slice_mut(&mut self, zone: usize) -> &mut [TritWord] {
        let start = zone * DRUM_ROWS_PER_ZONE;
        &mut self.cells[start..start + DRUM_ROWS_PER_ZONE]
    }

    pub fn read_zone(&self, zone: usize) -> Vec<TritWord> {
        self.zone_slice(zone).to_vec()
    }

    pub fn write_zone(&mut self, zone: usize, cells: &[TritWord]) {
        let dst = self.zone_slice_mut(zone);
        for (slot, cell) in dst.iter_mut().zip(cells) {
            *slot = cell.aligned_to(SHORT_WIDTH);
        }
    }
}

impl Default for Drum {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy the FRAM run starting at `addr` into the drum zone named by `mb`
/// (opcode `-0+`).
pub fn drum_write(fram: &Fram, addr: &TritWord, drum: &mut Drum, mb: &TritWord) {
    let run = fram.read_run(addr);
    drum.write_zone(Drum::zone_of(mb), &run);
}

/// Copy the drum zone named by `mb` into the FRAM run starting at `addr`
/// (opcode `-0-`).
pub fn drum_read(drum: &Drum, mb: &TritWord, fram: &mut Fram, addr: &TritWord) {
    let zone = drum.read_zone(Drum::zone_of(mb));
    fram.write_run(addr, &zone);
}

/// `Σ tᵢ·3^(k-i) + (3^k-1)/2`: balanced ternary to unsigned, per the
/// glossary definition. Used for FRAM row and drum zone/row decode.
pub fn bal3_to_uint(w: &TritWord) -> i64 {
    let bias = (3i64.pow(w.len() as u32) - 1) / 2;
    w.to_int() + bias
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> TritWord {
        TritWord::from_symbolic(s).unwrap()
    }

    #[test]
    fn short_store_load_roundtrip() {
        let mut fram = Fram::new();
        let a = addr("0000+");
        let v = TritWord::from_symbolic("+0-0+0-00").unwrap();
        fram.st_short(&a, &v);
        assert_eq!(fram.ld_short(&a).to_symbolic(), v.to_symbolic());
    }

    #[test]
    fn a5_zero_and_a5_minus_share_row_high_half() {
        let fram = Fram::new();
        let a0 = addr("00000");
        let am = addr("0000-");
        assert_eq!(Fram::row_of(&a0), Fram::row_of(&am));
        assert_eq!(Fram::page_of(&a0), 0);
    }

    #[test]
    fn a5_plus_selects_page_one() {
        assert_eq!(Fram::page_of(&addr("0000+")), 1);
    }

    #[test]
    fn long_load_store_roundtrip_and_matches_high_half() {
        let mut fram = Fram::new();
        let a_long = addr("0000-");
        let a_short_high = addr("00000");
        let v = TritWord::from_int(193_710_244, 18).unwrap();
        fram.st_long(&a_long, &v);
        assert_eq!(fram.ld_long(&a_long).to_int(), v.to_int());
        assert_eq!(fram.ld_short(&a_short_high).to_symbolic(), v.slice(1, 9).to_symbolic());
    }

    #[test]
    fn row_decode_matches_bias_formula() {
        let mid = addr("00000");
        assert_eq!(Fram::row_of(&mid), 40);
        let low = addr("----0");
        assert_eq!(Fram::row_of(&low), 0);
        let high = addr("++++0");
        assert_eq!(Fram::row_of(&high), 80);
    }

    #[test]
    fn drum_round_trips_through_fram_run() {
        let mut fram = Fram::new();
        let mut drum = Drum::new();
        let base = addr("----0");
        let run: Vec<TritWord> = (0..54)
            .map(|i| TritWord::from_int(i as i64 - 27, 9).unwrap())
            .collect();
        fram.write_run(&base, &run);

        let mb = TritWord::from_int(5, 4).unwrap();
        drum_write(&fram, &base, &mut drum, &mb);

        let mut fram2 = Fram::new();
        drum_read(&drum, &mb, &mut fram2, &base);
        assert_eq!(fram2.read_run(&base).iter().map(|w| w.to_int()).collect::<Vec<_>>(),
                   run.iter().map(|w| w.to_int()).collect::<Vec<_>>());
    }

    #[test]
    fn zone_of_wraps_rather_than_faults() {
        let max_mb = TritWord::from_int(40, 4).unwrap();
        assert!(Drum::zone_of(&max_mb) < DRUM_ZONES);
    }
}
