//! WinAnsiEncoding for the standard Type1 fonts.
//!
//! ASCII and Latin-1 map to themselves; a handful of typographic characters live
//! in the 0x80..=0x9F block. Anything else is written as `?`.

pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '\u{20AC}' => 0x80, // €
        '\u{201A}' => 0x82,
        '\u{2026}' => 0x85, // …
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95, // •
        '\u{2013}' => 0x96, // en dash
        '\u{2014}' => 0x97, // em dash
        '\u{2122}' => 0x99, // ™
        '\t' => b' ',
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(encode_win_ansi("HS Code: 28170010"), b"HS Code: 28170010");
    }

    #[test]
    fn test_bullet_and_dashes() {
        assert_eq!(encode_win_ansi("\u{2022} a"), vec![0x95, b' ', b'a']);
        assert_eq!(encode_win_ansi("8 \u{2013} 12"), vec![b'8', b' ', 0x96, b' ', b'1', b'2']);
    }

    #[test]
    fn test_latin1_maps_directly() {
        assert_eq!(encode_win_ansi("é°"), vec![0xE9, 0xB0]);
    }

    #[test]
    fn test_unencodable_becomes_question_mark() {
        assert_eq!(encode_win_ansi("₹1"), b"?1");
    }
}
