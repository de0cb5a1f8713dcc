//! Fuzzy string scoring.
//!
//! Scores are on a 0–100 scale. [`token_sort_ratio`] makes the comparison
//! insensitive to case, punctuation and word order, which is what user input
//! like `"biala podlaska"` vs `"Biała Podlaska"` needs.

/// Lowercase, and turn every non-alphanumeric character into a space.
fn full_process(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect()
}

/// Normalize a string and sort its whitespace-separated tokens.
pub fn token_sort(s: &str) -> String {
    let processed = full_process(s);
    let mut tokens: Vec<&str> = processed.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Length of the longest common subsequence of two char sequences.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity of two strings: `100 * 2 * LCS / (len(a) + len(b))`, rounded.
///
/// Returns 0 if either string is empty.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total = (a.len() + b.len()) as f64;
    let common = lcs_len(&a, &b) as f64;
    (200.0 * common / total).round() as u8
}

/// [`ratio`] of the token-sorted forms of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&token_sort(a), &token_sort(b))
}

/// Find the choice scoring highest against `query`.
///
/// Ties go to the earliest choice. Returns `None` only when there are no
/// choices.
pub fn best_match<'a, I>(query: &str, choices: I) -> Option<(&'a str, u8)>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = token_sort(query);
    let mut best: Option<(&'a str, u8)> = None;

    for choice in choices {
        let score = ratio(&query, &token_sort(choice));
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((choice, score));
        }
    }

    best
}
