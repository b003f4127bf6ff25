//! Edit-distance similarity between two short texts.
//!
//! Both functions work on Unicode code points and are case-sensitive;
//! callers lowercase first when they want a case-insensitive comparison.

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized similarity in `[0.0, 1.0]`: `(max_len - distance) / max_len`.
///
/// Two empty strings are a trivial perfect match and return `1.0`.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    (max_len - distance) as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn test_distance_counts_code_points() {
        // "á" is two bytes but one edit away from "a"
        assert_eq!(levenshtein_distance("está", "esta"), 1);
        assert_eq!(levenshtein_distance("¿qué?", "que"), 3);
    }

    #[test]
    fn test_identity_is_one() {
        for text in ["", "a", "¿cómo estás?", "me gusta el café"] {
            assert_eq!(normalized_similarity(text, text), 1.0);
        }
    }

    #[test]
    fn test_empty_conventions() {
        assert_eq!(normalized_similarity("", ""), 1.0);
        assert_eq!(normalized_similarity("hola", ""), 0.0);
        assert_eq!(normalized_similarity("", "adiós"), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("kitten", "sitting"),
            ("hola komo estas", "¿cómo estás?"),
            ("tengo hambre", "estoy con hambre"),
        ];
        for (a, b) in pairs {
            assert_eq!(normalized_similarity(a, b), normalized_similarity(b, a));
        }
    }

    #[test]
    fn test_normalized_similarity_values() {
        assert_eq!(normalized_similarity("helo", "hello"), 0.8);
        assert_eq!(normalized_similarity("hola komo estas", "¿cómo estás?"), 0.4);
        assert!(normalized_similarity("abc", "xyz") < 0.5);
    }

    #[test]
    fn test_accents_use_char_length() {
        // 1 edit over 12 chars, not over the byte length
        let similarity = normalized_similarity("¿como estás?", "¿cómo estás?");
        assert!((similarity - 11.0 / 12.0).abs() < 1e-9);
    }
}
