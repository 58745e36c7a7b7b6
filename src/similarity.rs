//! Text similarity primitives used by change classification and move detection.
//!
//! Both functions are pure and deterministic; they are the tie-breakers for
//! every fuzzy decision in the crate, so their results must be reproducible
//! bit-for-bit for identical inputs.

/// Jaro-Winkler similarity between two strings, in `[0.0, 1.0]`.
///
/// Standard Jaro similarity (match window of `max(len) / 2 - 1`, greedy
/// left-to-right matching, transpositions counted over matched pairs) with
/// the Winkler boost over a common prefix of up to 4 characters at 0.1
/// weight per character. Equal strings return exactly 1.0; if either string
/// is empty and they are not equal, returns 0.0.
pub fn jaro_winkler(s1: &str, s2: &str) -> f64 {
    if s1 == s2 {
        return 1.0;
    }
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let match_distance = (a.len().max(b.len()) / 2).saturating_sub(1);
    let mut a_matches = vec![false; a.len()];
    let mut b_matches = vec![false; b.len()];

    let mut matches = 0usize;
    for (i, &ca) in a.iter().enumerate() {
        let start = i.saturating_sub(match_distance);
        let end = (i + match_distance + 1).min(b.len());
        for j in start..end {
            if b_matches[j] || b[j] != ca {
                continue;
            }
            a_matches[i] = true;
            b_matches[j] = true;
            matches += 1;
            break;
        }
    }
    if matches == 0 {
        return 0.0;
    }

    let mut transpositions = 0.0;
    let mut k = 0usize;
    for (i, &ca) in a.iter().enumerate() {
        if !a_matches[i] {
            continue;
        }
        while !b_matches[k] {
            k += 1;
        }
        if ca != b[k] {
            transpositions += 1.0;
        }
        k += 1;
    }
    transpositions /= 2.0;

    let m = matches as f64;
    let jaro =
        (m / a.len() as f64 + m / b.len() as f64 + (m - transpositions) / m) / 3.0;

    let mut prefix = 0usize;
    for i in 0..4.min(a.len().min(b.len())) {
        if a[i] == b[i] {
            prefix += 1;
        } else {
            break;
        }
    }
    jaro + prefix as f64 * 0.1 * (1.0 - jaro)
}

/// Classic Levenshtein edit distance (insert, delete, substitute, unit cost
/// each), computed over the full dynamic-programming matrix.
pub fn levenshtein(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        dp[0][j] = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let substitute = dp[i - 1][j - 1] + usize::from(a[i - 1] != b[j - 1]);
            dp[i][j] = substitute.min(dp[i - 1][j] + 1).min(dp[i][j - 1] + 1);
        }
    }
    dp[a.len()][b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jaro_winkler_identical() {
        assert_eq!(jaro_winkler("public void run()", "public void run()"), 1.0);
        assert_eq!(jaro_winkler("", ""), 1.0);
    }

    #[test]
    fn test_jaro_winkler_empty_operand() {
        assert_eq!(jaro_winkler("", "something"), 0.0);
        assert_eq!(jaro_winkler("something", ""), 0.0);
    }

    #[test]
    fn test_jaro_winkler_symmetric() {
        let pairs = [
            ("MARTHA", "MARHTA"),
            ("int add(int a, int b)", "int add(int a, int b, int c)"),
            ("x", "y"),
        ];
        for (a, b) in pairs {
            assert_eq!(jaro_winkler(a, b), jaro_winkler(b, a));
        }
    }

    #[test]
    fn test_jaro_winkler_known_value() {
        // MARTHA/MARHTA: jaro 0.944..., prefix 3 -> 0.9611...
        let sim = jaro_winkler("MARTHA", "MARHTA");
        assert!((sim - 0.9611).abs() < 0.001, "got {}", sim);
    }

    #[test]
    fn test_jaro_winkler_disjoint() {
        assert_eq!(jaro_winkler("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_jaro_winkler_range() {
        let sim = jaro_winkler("void run()", "void run(int x)");
        assert!(sim > 0.0 && sim < 1.0);
    }

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("kitten", "kitten"), 0);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn test_levenshtein_known_values() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
    }

    #[test]
    fn test_levenshtein_symmetric() {
        assert_eq!(levenshtein("kitten", "sitting"), levenshtein("sitting", "kitten"));
    }

    #[test]
    fn test_levenshtein_triangle_inequality() {
        let triples = [
            ("kitten", "sitting", "mitten"),
            ("", "abc", "abd"),
            ("void run()", "void run(int x)", "int run()"),
        ];
        for (a, b, c) in triples {
            assert!(levenshtein(a, c) <= levenshtein(a, b) + levenshtein(b, c));
        }
    }
}
