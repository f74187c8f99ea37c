//! Approximate string matching for the search fallback

/// Similarity of two strings on a 0-100 scale, based on their longest common
/// subsequence: `200 * lcs / (len_a + len_b)`.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of the shorter string against every window of the longer
/// one. Windows are as long as the shorter string, except near the end of the
/// longer string where they are cut short. Returns 0 when either side is empty.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    if shorter.is_empty() {
        return 0;
    }

    let mut best = 0;
    for start in 0..longer.len() {
        let end = (start + shorter.len()).min(longer.len());
        let score = ratio_chars(shorter, &longer[start..end]);
        if score == 100 {
            return 100;
        }
        best = best.max(score);
    }
    best
}

fn ratio_chars(a: &[char], b: &[char]) -> u8 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    let common = lcs_len(a, b);
    // Halves go to the even neighbour: 60.5 scores 60
    (200.0 * common as f64 / total as f64).round_ties_even() as u8
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];

    for &ac in a {
        for (j, &bc) in b.iter().enumerate() {
            cur[j + 1] = if ac == bc {
                prev[j] + 1
            } else {
                prev[j + 1].max(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}
