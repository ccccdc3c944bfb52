//! Short avatar labels derived from shortcut titles.
//!
//! The title is split into words on whitespace and `|`. One word yields its
//! first two characters, capitalized (`"onetitle"` → `"On"`). Two or more
//! words yield the uppercased initials of the first two (`"more | title
//! words"` → `"MT"`). A one-character word yields just that character
//! uppercased; a title with no words yields [`FALLBACK_LABEL`].

/// Label used when a title has no words at all.
pub const FALLBACK_LABEL: &str = "?";

/// Derive the avatar label for a title.
///
/// Total over all strings and never longer than two characters.
#[must_use]
pub fn abbreviate(title: &str) -> String {
    let mut words = title
        .split(|c: char| c.is_whitespace() || c == '|')
        .filter(|word| !word.is_empty());

    match (words.next(), words.next()) {
        (None, _) => FALLBACK_LABEL.to_string(),
        (Some(word), None) => {
            let mut chars = word.chars();
            let mut label = String::with_capacity(8);
            if let Some(first) = chars.next() {
                label.push(upper(first));
            }
            if let Some(second) = chars.next() {
                label.push(lower(second));
            }
            label
        }
        (Some(first), Some(second)) => [first, second]
            .iter()
            .filter_map(|word| word.chars().next())
            .map(upper)
            .collect(),
    }
}

// Case mappings that expand (e.g. 'ß' -> "SS") keep only the first char.
fn upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_word() {
        assert_eq!(abbreviate("onetitle"), "On");
        assert_eq!(abbreviate("API"), "Ap");
    }

    #[test]
    fn test_two_words() {
        assert_eq!(abbreviate("two title"), "TT");
        assert_eq!(abbreviate("some title"), "ST");
    }

    #[test]
    fn test_pipe_separates_words() {
        assert_eq!(abbreviate("more | title words"), "MT");
        assert_eq!(abbreviate("more|title"), "MT");
    }

    #[test]
    fn test_only_first_two_words_count() {
        assert_eq!(abbreviate("a b c d"), "AB");
    }

    #[test]
    fn test_surrounding_delimiters_are_ignored() {
        assert_eq!(abbreviate("  | onetitle |  "), "On");
        assert_eq!(abbreviate("\ttwo\n title"), "TT");
    }

    #[test]
    fn test_short_titles() {
        assert_eq!(abbreviate("x"), "X");
        assert_eq!(abbreviate("x y"), "XY");
        assert_eq!(abbreviate(""), FALLBACK_LABEL);
        assert_eq!(abbreviate("   "), FALLBACK_LABEL);
        assert_eq!(abbreviate(" | | "), FALLBACK_LABEL);
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(abbreviate("éclair"), "Éc");
        assert_eq!(abbreviate("über alles"), "ÜA");
        assert_eq!(abbreviate("ßtraße"), "St");
        assert_eq!(abbreviate("日本 語"), "日語");
    }

    #[test]
    fn test_digits_and_symbols_pass_through() {
        assert_eq!(abbreviate("42 things"), "4T");
        assert_eq!(abbreviate("#ops"), "#o");
    }

    proptest! {
        #[test]
        fn prop_label_is_short_and_nonempty(title in "\\PC*") {
            let label = abbreviate(&title);
            let n = label.chars().count();
            prop_assert!((1..=2).contains(&n), "{:?} -> {:?}", title, label);
        }

        #[test]
        fn prop_single_word_is_capitalized_prefix(word in "[a-zA-Z]{2,12}") {
            let mut chars = word.chars();
            let expected: String = [
                chars.next().unwrap().to_ascii_uppercase(),
                chars.next().unwrap().to_ascii_lowercase(),
            ]
            .iter()
            .collect();
            prop_assert_eq!(abbreviate(&word), expected);
        }

        #[test]
        fn prop_multi_word_uses_first_two_initials(
            words in prop::collection::vec("[a-z][a-z0-9]{0,8}", 2..6),
            sep in "( |\\||  | \\| )",
        ) {
            let title = words.join(&sep);
            let expected: String = words[..2]
                .iter()
                .map(|w| w.chars().next().unwrap().to_ascii_uppercase())
                .collect();
            prop_assert_eq!(abbreviate(&title), expected);
        }

        #[test]
        fn prop_deterministic(title in "\\PC*") {
            prop_assert_eq!(abbreviate(&title), abbreviate(&title));
        }
    }
}
