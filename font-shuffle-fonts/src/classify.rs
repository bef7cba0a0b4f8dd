//! Family name classification.

/// Substrings that mark a family name as Japanese-capable.
///
/// This is a name heuristic, not a coverage probe: glyph-level Unicode
/// coverage checking is deliberately out of scope, and the families this
/// misses still remain available through the `Auto`/`Random` full list.
const JAPANESE_KEYWORDS: &[&str] = &[
    "gothic",
    "mincho",
    "meiryo",
    "yu ",
    "noto",
    "游",
    "メイリオ",
    "ゴシック",
    "明朝",
    "ヒラギノ",
    "hiragino",
    "小塚",
    "kozuka",
    "源ノ角",
    "cjk",
];

/// Whether a family name looks like a Japanese-capable font.
pub fn is_japanese_family(family: &str) -> bool {
    let lower = family.to_lowercase();
    JAPANESE_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_japanese_families_match() {
        assert!(is_japanese_family("Yu Gothic UI"));
        assert!(is_japanese_family("MS Mincho"));
        assert!(is_japanese_family("メイリオ"));
        assert!(is_japanese_family("Noto Sans CJK JP"));
        assert!(is_japanese_family("ヒラギノ角ゴ"));
    }

    #[test]
    fn latin_families_do_not_match() {
        assert!(!is_japanese_family("Arial"));
        assert!(!is_japanese_family("Times New Roman"));
        assert!(!is_japanese_family("Helvetica"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_japanese_family("YU GOTHIC"));
        assert!(is_japanese_family("noto serif jp"));
    }
}
