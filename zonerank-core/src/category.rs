//! Business category normalisation.
//!
//! Callers pass categories in whatever casing the presentation layer uses
//! ("Gas Station", "gym", "PHARMACY"). Everything downstream (weight lookup,
//! competitor matching) works on the normalised key produced here.

/// Sentinel meaning "no category selected".
pub const UNSELECTED: &str = "none";

/// Category keys with dedicated weights, in table order.
pub const KNOWN_CATEGORIES: [&str; 6] = [
    "barber",
    "gym",
    "gas_station",
    "laundry",
    "pharmacy",
    "supermarket",
];

const DISPLAY_NAMES: [(&str, &str); 6] = [
    ("Barber", "barber"),
    ("Gym", "gym"),
    ("Gas Station", "gas_station"),
    ("Laundry", "laundry"),
    ("Pharmacy", "pharmacy"),
    ("Supermarket", "supermarket"),
];

/// Map a raw category string onto its internal key.
///
/// Display names are matched case-insensitively. Anything else is lower-cased
/// with whitespace runs collapsed into single underscores. Blank input and the
/// `none` sentinel normalise to `none`.
///
/// # Examples
///
/// ```
/// use zonerank_core::normalise_category;
///
/// assert_eq!(normalise_category("Gas Station"), "gas_station");
/// assert_eq!(normalise_category("gas station"), "gas_station");
/// assert_eq!(normalise_category("Pet  Grooming"), "pet_grooming");
/// assert_eq!(normalise_category(""), "none");
/// ```
#[must_use]
pub fn normalise_category(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNSELECTED) {
        return UNSELECTED.to_owned();
    }

    if let Some((_, key)) = DISPLAY_NAMES
        .iter()
        .find(|(display, _)| display.eq_ignore_ascii_case(trimmed))
    {
        return (*key).to_owned();
    }

    trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Report whether `raw` means "no category selected".
///
/// # Examples
///
/// ```
/// use zonerank_core::is_unselected;
///
/// assert!(is_unselected("none"));
/// assert!(is_unselected("  "));
/// assert!(!is_unselected("gym"));
/// ```
#[must_use]
pub fn is_unselected(raw: &str) -> bool {
    normalise_category(raw) == UNSELECTED
}
