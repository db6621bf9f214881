//! Closest-match suggestions for unresolved group names.

/// Closest candidate to `target` by edit distance. No distance cutoff:
/// any candidate qualifies, and ties break toward the earliest candidate.
pub(crate) fn closest(target: &str, candidates: &[String]) -> Option<String> {
    let mut best: Option<(usize, &str)> = None;
    for candidate in candidates {
        let dist = levenshtein(target, candidate);
        if best.map(|(b, _)| dist < b).unwrap_or(true) {
            best = Some((dist, candidate));
        }
    }
    best.map(|(_, c)| c.to_string())
}

/// Levenshtein distance with a single rolling row.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_ch) in a.chars().enumerate() {
        // `diag` tracks the value the cell up-left of the one being written.
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let substitute = diag + usize::from(a_ch != *b_ch);
            diag = row[j + 1];
            row[j + 1] = substitute.min(diag + 1).min(row[j] + 1);
        }
    }
    row[b_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("user", "user"), 0);
        assert_eq!(levenshtein("user", "use"), 1);
        assert_eq!(levenshtein("", "user"), 4);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn closest_picks_the_nearest_candidate() {
        let candidates = vec!["server".to_string(), "user".to_string()];
        assert_eq!(closest("user utils", &candidates).as_deref(), Some("user"));
        assert_eq!(closest("servre", &candidates).as_deref(), Some("server"));
    }

    #[test]
    fn closest_is_none_without_candidates() {
        assert_eq!(closest("user", &[]), None);
    }

    #[test]
    fn ties_break_toward_the_earliest_candidate() {
        let candidates = vec!["aa".to_string(), "ab".to_string()];
        assert_eq!(closest("a", &candidates).as_deref(), Some("aa"));
    }
}
