//! Character-level text similarity for transcript/segment scoring.

/// Longest-common-subsequence ratio: `2 * LCS(a, b) / (|a| + |b|)` over
/// characters. 1.0 for identical non-empty strings, 0.0 when both are empty.
pub fn lcs_ratio(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Two-row DP over the shorter string to bound the working set.
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let mut prev = vec![0usize; short.len() + 1];
    let mut cur = vec![0usize; short.len() + 1];
    for &lc in long.iter() {
        for (j, &sc) in short.iter().enumerate() {
            cur[j + 1] = if lc == sc {
                prev[j] + 1
            } else {
                prev[j + 1].max(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    let lcs = prev[short.len()];
    2.0 * lcs as f32 / total as f32
}

/// Fraction of the smaller keyword set whose members each have some
/// counterpart in the other set with pairwise `lcs_ratio` above `cutoff`.
/// 0.0 whenever either set is empty.
pub fn keyword_overlap(a: &[String], b: &[String], cutoff: f32) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let hits = small
        .iter()
        .filter(|k| large.iter().any(|o| lcs_ratio(k, o) > cutoff))
        .count();
    hits as f32 / small.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(lcs_ratio("hello", "hello"), 1.0);
        assert_eq!(lcs_ratio("人工智能", "人工智能"), 1.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(lcs_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(lcs_ratio("", ""), 0.0);
        assert_eq!(lcs_ratio("abc", ""), 0.0);
    }

    #[test]
    fn partial_overlap_scores_between() {
        // LCS("abcd", "abxd") = "abd", ratio = 2*3/8 = 0.75.
        assert!((lcs_ratio("abcd", "abxd") - 0.75).abs() < 1e-6);
    }

    #[test]
    fn ratio_is_symmetric() {
        let ab = lcs_ratio("项目背景介绍", "背景");
        let ba = lcs_ratio("背景", "项目背景介绍");
        assert_eq!(ab, ba);
    }

    #[test]
    fn overlap_of_identical_sets_is_one() {
        let ks: Vec<String> = ["人工", "智能", "发展"].iter().map(|s| s.to_string()).collect();
        assert_eq!(keyword_overlap(&ks, &ks, 0.6), 1.0);
    }

    #[test]
    fn overlap_with_empty_set_is_zero() {
        let ks = vec!["hello".to_string()];
        assert_eq!(keyword_overlap(&ks, &[], 0.6), 0.0);
        assert_eq!(keyword_overlap(&[], &ks, 0.6), 0.0);
    }

    #[test]
    fn overlap_counts_fraction_of_smaller_set() {
        let small: Vec<String> = ["人工", "宇宙"].iter().map(|s| s.to_string()).collect();
        let large: Vec<String> =
            ["人工", "智能", "发展"].iter().map(|s| s.to_string()).collect();
        // "人工" matches exactly; "宇宙" matches nothing above the cutoff.
        assert!((keyword_overlap(&small, &large, 0.6) - 0.5).abs() < 1e-6);
    }
}
