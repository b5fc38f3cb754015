//! Normalization of categorical values into canonical identifiers.

use super::VALUE_DELIMITER;

/// Map a raw categorical value to its canonical identifier.
///
/// Surrounding whitespace is dropped, then the value is lowercased, spaces and
/// `-` become `_`, and `+` becomes `plus`. The transform is idempotent.
///
/// ```
/// use build_advisor::enumeration::normalize;
///
/// assert_eq!(normalize("Zen 4"), "zen_4");
/// assert_eq!(normalize("Micro-ATX"), "micro_atx");
/// assert_eq!(normalize("M.2-2280"), "m.2_2280");
/// assert_eq!(normalize("PCIe 4.0 X4 + SATA"), "pcie_4.0_x4_plus_sata");
/// assert_eq!(normalize(&normalize("Zen 4")), normalize("Zen 4"));
/// ```
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        match ch {
            ' ' | '-' => out.push('_'),
            '+' => out.push_str("plus"),
            c => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Split a multi-value cell such as `"Black / Gray"` into trimmed atoms.
pub fn split_atoms(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(VALUE_DELIMITER)
        .map(str::trim)
        .filter(|atom| !atom.is_empty())
}
