//! Label helpers: field keys and route segments to human-readable text.

/// Field key to form label: underscores become spaces.
/// e.g. "Contact_No" -> "Contact No", "created_at" -> "created at"
pub fn field_label(key: &str) -> String {
    key.replace('_', " ")
}

/// Route segment to title: separators become spaces, each word capitalized.
/// e.g. "daily-works" -> "Daily Works", "vat_stmt" -> "Vat Stmt"
pub fn segment_title(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(field_label("Contact_No"), "Contact No");
        assert_eq!(field_label("name"), "name");
        assert_eq!(segment_title("daily-works"), "Daily Works");
        assert_eq!(segment_title("vat_stmt"), "Vat Stmt");
        assert_eq!(segment_title("--"), "");
    }
}
