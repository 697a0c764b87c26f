//! The "electrified typewriter" text rendering: a 3-trit code maps to a
//! glyph depending on two pieces of explicit state, the alphabet
//! (Russian/Latin) and the shift (Letter/Figure), ported from
//! `electrified_typewriter()` in the original C source. Both switches are
//! owned fields on `Typewriter`, never hidden statics.

use setun_core::TritWord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Russian,
    Latin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Letter,
    Figure,
}

/// Owns the typewriter's mutable state. `language` is set by the caller
/// (the original's `local` parameter); `mode` is mutated only by the two
/// shift codes (`11` -> Figure, `12` -> Letter).
#[derive(Debug, Clone, Copy)]
pub struct Typewriter {
    pub language: Lang,
    pub mode: Mode,
}

impl Typewriter {
    pub fn new(language: Lang) -> Self {
        Typewriter {
            language,
            mode: Mode::Letter,
        }
    }

    /// Feeds one 3-trit code through the typewriter, returning the glyph
    /// to print, or `None` for a silent control code (shift, color switch).
    pub fn feed(&mut self, code: i64) -> Option<&'static str> {
        match code {
            12 => {
                self.mode = Mode::Letter;
                None
            }
            11 => {
                self.mode = Mode::Figure;
                None
            }
            -10 => Some("\r\n"),
            -11 => match self.language {
                Lang::Russian => None, // tape color shift, not a glyph
                Lang::Latin => Some("?"),
            },
            _ => glyph_table(code, self.language, self.mode),
        }
    }

    /// Feeds a 9-trit word as three consecutive 3-trit codes (the high,
    /// middle, and low trytes, matching the original's per-tryte calls),
    /// concatenating whatever glyphs result.
    pub fn feed_word(&mut self, word: &TritWord) -> String {
        let mut out = String::new();
        for tryte in [word.slice(1, 3), word.slice(4, 6), word.slice(7, 9)] {
            if tryte.len() != 3 {
                continue;
            }
            if let Some(glyph) = self.feed(tryte.to_int()) {
                out.push_str(glyph);
            }
        }
        out
    }
}

/// The printable-code table, straight from `electrified_typewriter()`'s
/// switch statement; codes 11, 12, -10, -11 are handled by the caller and
/// never reach here.
fn glyph_table(code: i64, lang: Lang, mode: Mode) -> Option<&'static str> {
    use Lang::*;
    use Mode::*;
    let s = match (code, lang, mode) {
        (6, Russian, Letter) => "А",
        (6, Russian, Figure) => "6",
        (6, Latin, Letter) => "A",
        (6, Latin, Figure) => "6",

        (7, Russian, Letter) => "В",
        (7, Russian, Figure) => "7",
        (7, Latin, Letter) => "B",
        (7, Latin, Figure) => "7",

        (8, Russian, Letter) => "С",
        (8, Russian, Figure) => "8",
        (8, Latin, Letter) => "C",
        (8, Latin, Figure) => "8",

        (9, Russian, Letter) => "Д",
        (9, Russian, Figure) => "9",
        (9, Latin, Letter) => "D",
        (9, Latin, Figure) => "9",

        (10, Russian, Letter) => "Е",
        (10, Russian, Figure) => " ",
        (10, Latin, Letter) => "E",
        (10, Latin, Figure) => " ",

        (-12, Russian, Letter) => "Б",
        (-12, Russian, Figure) => "-",
        (-12, Latin, Letter) => "F",
        (-12, Latin, Figure) => "-",

        (-9, Russian, Letter) => "Щ",
        (-9, Russian, Figure) => "Ю",
        (-9, Latin, Letter) => "G",
        (-9, Latin, Figure) => "/",

        (-8, Russian, Letter) => "Н",
        (-8, Russian, Figure) => ",",
        (-8, Latin, Letter) => "H",
        (-8, Latin, Figure) => ".",

        (-6, Russian, Letter) => "I",
        (-6, Russian, Figure) => "+",
        (-6, Latin, Letter) => "Л",
        (-6, Latin, Figure) => "+",

        (-5, Russian, Letter) => "Ы",
        (-5, Russian, Figure) => "Э",
        (-5, Latin, Letter) => "J",
        (-5, Latin, Figure) => "V",

        (-4, Russian, Letter) => "К",
        (-4, Russian, Figure) => "Ж",
        (-4, Latin, Letter) => "K",
        (-4, Latin, Figure) => "W",

        (-3, Russian, Letter) => "Г",
        (-3, Russian, Figure) => "Х",
        (-3, Latin, Letter) => "L",
        (-3, Latin, Figure) => "X",

        (-2, Russian, Letter) => "М",
        (-2, Russian, Figure) => "У",
        (-2, Latin, Letter) => "M",
        (-2, Latin, Figure) => "Y",

        (-1, Russian, Letter) => "И",
        (-1, Russian, Figure) => "Ц",
        (-1, Latin, Letter) => "N",
        (-1, Latin, Figure) => "Z",

        (0, Russian, Letter) => "Р",
        (0, Russian, Figure) => "О",
        (0, Latin, Letter) => "P",
        (0, Latin, Figure) => "O",

        (1, Russian, Letter) => "Й",
        (1, Russian, Figure) => "1",
        (1, Latin, Letter) => "Q",
        (1, Latin, Figure) => "1",

        (2, Russian, Letter) => "Я",
        (2, Russian, Figure) => "2",
        (2, Latin, Letter) => "R",
        (2, Latin, Figure) => "2",

        (3, Russian, Letter) => "Ь",
        (3, Russian, Figure) => "3",
        (3, Latin, Letter) => "S",
        (3, Latin, Figure) => "3",

        (4, Russian, Letter) => "Т",
        (4, Russian, Figure) => "4",
        (4, Latin, Letter) => "T",
        (4, Latin, Figure) => "4",

        (5, Russian, Letter) => "П",
        (5, Russian, Figure) => "5",
        (5, Latin, Letter) => "U",
        (5, Latin, Figure) => "5",

        (13, Russian, Letter) => "Ш",
        (13, Russian, Figure) => "Ф",
        (13, Latin, Letter) => "(",
        (13, Latin, Figure) => ")",

        (-7, Russian, Letter) => "=",
        (-7, Russian, Figure) => "х",
        (-7, Latin, Letter) => "=",
        (-7, Latin, Figure) => "x",

        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_russian_letter() {
        let tw = Typewriter::new(Lang::Russian);
        assert_eq!(tw.mode, Mode::Letter);
    }

    #[test]
    fn shift_codes_toggle_mode_without_printing() {
        let mut tw = Typewriter::new(Lang::Russian);
        assert_eq!(tw.feed(11), None);
        assert_eq!(tw.mode, Mode::Figure);
        assert_eq!(tw.feed(9), Some("9"));
        assert_eq!(tw.feed(12), None);
        assert_eq!(tw.mode, Mode::Letter);
        assert_eq!(tw.feed(9), Some("Д"));
    }

    #[test]
    fn newline_code_is_universal() {
        let mut tw = Typewriter::new(Lang::Latin);
        assert_eq!(tw.feed(-10), Some("\r\n"));
    }

    #[test]
    fn unmapped_code_is_silent() {
        let mut tw = Typewriter::new(Lang::Russian);
        assert_eq!(tw.feed(-13), None);
    }
}
