use once_cell::sync::Lazy;
use regex::Regex;

/// `YYYY-MM-DD`, optionally followed by `T`/space + `HH:MM:SS`, fraction and offset.
static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}(?:[Tt ][0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?(?:Z|[+-][0-9]{2}:?[0-9]{2})?)?$",
    )
    .expect("ISO date pattern compiles")
});

/// Shape check only; `2024-13-45` still counts.
pub fn looks_like_date(s: &str) -> bool {
    ISO_DATE.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_forms() {
        for s in [
            "2024-01-31",
            "2024-01-31T12:30:00",
            "2024-01-31t12:30:00Z",
            "2024-01-31 12:30:00.123",
            "2024-01-31T12:30:00+09:00",
            "2024-01-31T12:30:00-0500",
        ] {
            assert!(looks_like_date(s), "{s}");
        }
    }

    #[test]
    fn rejects_other_strings() {
        for s in ["", "2024-1-31", "2024-01-31T12:30", "31/01/2024", "2024-01-31Z", "x2024-01-31"] {
            assert!(!looks_like_date(s), "{s}");
        }
    }
}
