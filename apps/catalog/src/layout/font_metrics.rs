//! Static glyph-width tables for the two standard PDF fonts the catalog uses.
//!
//! Widths are in thousandths of an em, straight from the Adobe Core 14 AFM files,
//! so `measure_str(s) * size / 1000` is the rendered width in points. Centered and
//! right-aligned strings need this because the standard fonts are not embedded and
//! the PDF has no layout engine of its own.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// The standard Type1 fonts used on catalog pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript name written into the font dictionary.
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    /// Width of U+2022 BULLET, used by every specification line.
    pub bullet_width: u16,
    /// Fallback for any other non-ASCII character.
    pub average_char_width: u16,
}

impl FontMetricTable {
    /// Measures a string in thousandths of an em.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else if c == '\u{2022}' {
                    self.bullet_width
                } else {
                    self.average_char_width
                }
            })
            .map(f32::from)
            .sum()
    }

    /// Rendered width in points at the given font size.
    pub fn text_width(&self, s: &str, size: f32) -> f32 {
        self.measure_str(s) * size / 1000.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    bullet_width: 350,
    average_char_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    bullet_width: 350,
    average_char_width: 611,
};

/// Returns the static metric table for a font.
pub fn get_metrics(font: Font) -> &'static FontMetricTable {
    match font {
        Font::Helvetica => &HELVETICA_TABLE,
        Font::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(Font::Helvetica).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // "Zinc" = Z(611) + i(222) + n(556) + c(500) = 1889
        let width = get_metrics(Font::Helvetica).measure_str("Zinc");
        assert!((width - 1889.0).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_bullet_has_its_own_width() {
        let metrics = get_metrics(Font::Helvetica);
        assert_eq!(metrics.measure_str("\u{2022}"), 350.0);
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = get_metrics(Font::HelveticaBold);
        assert_eq!(
            metrics.measure_str("é"),
            f32::from(metrics.average_char_width)
        );
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "CODEX AUTOMATION KEY";
        let regular = get_metrics(Font::Helvetica).measure_str(text);
        let bold = get_metrics(Font::HelveticaBold).measure_str(text);
        assert!(bold > regular);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let metrics = get_metrics(Font::Helvetica);
        let at_10 = metrics.text_width("Product Catalog", 10.0);
        let at_20 = metrics.text_width("Product Catalog", 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-3);
    }

    #[test]
    fn test_resource_names_are_distinct() {
        assert_ne!(
            Font::Helvetica.resource_name(),
            Font::HelveticaBold.resource_name()
        );
        assert_eq!(Font::HelveticaBold.base_font(), "Helvetica-Bold");
    }
}
