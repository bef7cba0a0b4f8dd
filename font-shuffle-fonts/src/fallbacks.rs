//! Fallback family configuration.
//!
//! When a shuffle mode's candidate list filters down to nothing (all fonts
//! hidden, or an empty custom selection), the active-list resolution falls
//! back to these families rather than handing the sequencer an empty list.

/// Fallback font families in priority order.
///
/// The order mirrors the audience of the effect:
/// 1. Common Japanese UI/print families
/// 2. Pan-CJK coverage
/// 3. Ubiquitous Latin families
pub const FALLBACK_FAMILIES: &[&str] = &[
    // Japanese families
    "Yu Gothic UI",
    "Yu Gothic",
    "Meiryo",
    "MS Gothic",
    "Hiragino Sans",
    // Pan-CJK coverage
    "Noto Sans CJK JP",
    "Noto Sans JP",
    // Latin families
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
];

/// Last-resort generic family handed out when none of the fallback families
/// exist in the catalog. Text backends resolve it to whatever sans face
/// they have; the sequencer itself only needs a non-empty list.
pub const UNIVERSAL_FALLBACK: &str = "sans-serif";
