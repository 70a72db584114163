use std::fmt::Display;

use deunicode::deunicode;

fn is_kept(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '%' | '-' | '.' | ',' | '<' | '>' | ' ' | '(' | ')')
}

/// Normalizes a lookup key so that slightly different spellings compare equal.
///
/// The key is trimmed, lower-cased and transliterated to ASCII. All the characters
/// that are not lowercase ASCII letters, digits or one of `%-.,<> ()` are then removed.
///
/// ```
/// use answer_matching::normalize_key;
///
/// assert_eq!(normalize_key(" Fóo* "), "foo");
/// assert_eq!(normalize_key(1.5), "1.5");
/// ```
pub fn normalize_key(key: impl Display) -> String {
    let lowered = key.to_string().trim().to_lowercase();
    let kept: String = deunicode(&lowered).chars().filter(|c| is_kept(*c)).collect();
    // Removing characters may expose whitespace at the edges.
    kept.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_case_and_whitespace() {
        assert_eq!(normalize_key("Foo "), "foo");
        assert_eq!(normalize_key(" Bar"), "bar");
        assert_eq!(normalize_key("  Baz  "), "baz");
    }

    #[test]
    fn strips_diacritics() {
        assert_eq!(normalize_key("Fóo*"), "foo");
        assert_eq!(normalize_key("Crème Brûlée"), "creme brulee");
        assert_eq!(normalize_key("Ångström"), "angstrom");
    }

    #[test]
    fn transliterates_letters_without_decomposition() {
        assert_eq!(normalize_key("Łódź"), "lodz");
        assert_eq!(normalize_key("Straße"), "strasse");
        assert_eq!(normalize_key("Søren Æble"), "soren aeble");
        assert_eq!(normalize_key("Đakovo"), "dakovo");
        assert!(crate::answer_option_is_same_as_factual("Łódź", "Lodz"));
    }

    #[test]
    fn removes_punctuation() {
        for k in [
            " Qux! ", " Qux$ ", " Qux& ", " Qux* ", " Qux+ ", " Qux/ ", " Qux= ", " Qux? ",
            " Qux@ ", " Qux[ ", " Qux] ", " Qux^ ", " Qux{ ", " Qux} ", " Qux| ", " Qux~ ",
            " Qux# ", " Qux' ", " Qux` ", " Qux ",
        ] {
            assert_eq!(normalize_key(k), "qux", "key {:?}", k);
        }
    }

    #[test]
    fn keeps_allowed_punctuation() {
        assert_eq!(normalize_key("30-40%"), "30-40%");
        assert_eq!(normalize_key("< 1,000.5 (approx)"), "< 1,000.5 (approx)");
        assert_eq!(normalize_key("1000€"), "1000");
        assert_eq!(normalize_key("$14 billion"), "14 billion");
    }

    #[test]
    fn numbers() {
        assert_eq!(normalize_key(1), "1");
        assert_eq!(normalize_key(1.25), "1.25");
    }

    #[test]
    fn idempotent() {
        for k in ["Qux !", "  A  b  ", "Fóo*", "ℌello", "", "!!!", "30-40 %"] {
            let once = normalize_key(k);
            assert_eq!(normalize_key(&once), once, "key {:?}", k);
        }
    }
}
