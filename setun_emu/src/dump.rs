//! Instruction memory dump: a row-major listing of every FRAM cell.
//! Content only — the exact text layout is not a contract any other
//! part of the workspace depends on.

use setun_core::codec::word_to_nonary;
use setun_core::memory::Fram;

pub fn dump_fram(fram: &Fram) -> String {
    let mut out = String::new();
    for row in 0..fram.rows() {
        for page in 0..fram.pages() {
            let cell = fram.cell_at(row, page);
            out.push_str(&format!(
                "{row:02} {page} {trits} {value:>6} {nonary}\n",
                row = row,
                page = page,
                trits = cell.to_symbolic(),
                value = cell.to_int(),
                nonary = word_to_nonary(cell),
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use setun_core::TritWord;

    #[test]
    fn dump_has_one_line_per_cell() {
        let fram = Fram::new();
        let text = dump_fram(&fram);
        assert_eq!(text.lines().count(), fram.rows() * fram.pages());
    }

    #[test]
    fn dump_reflects_a_poked_cell() {
        let mut fram = Fram::new();
        let addr = TritWord::from_symbolic("0000+").unwrap();
        fram.st_short(&addr, &TritWord::from_int(7, 9).unwrap());
        let text = dump_fram(&fram);
        assert!(text.lines().any(|l| l.contains("     7")));
    }
}
