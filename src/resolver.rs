//! Closest-match lookup of a spoken album name against a loaded catalog.

use crate::catalog::{normalize_album_key, Catalog};

/// Outcome of resolving one query. `id` is `None` when nothing scored above 0.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub id: Option<String>,
    pub matched_key: String,
    pub score: f64,
}

impl MatchResult {
    fn no_match() -> Self {
        Self {
            id: None,
            matched_key: String::new(),
            score: 0.0,
        }
    }

    pub fn is_match(&self) -> bool {
        self.id.is_some()
    }
}

/// Similarity in `[0, 1]` defined as `2 * M / T`, where `M` counts characters
/// in matching blocks and `T` is the combined length. Blocks are found
/// Ratcliff/Obershelp style: take the longest common block, then recurse on
/// the pieces to its left and right. Two empty strings are identical.
pub fn similarity_ratio(left: &str, right: &str) -> f64 {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();
    let total = left.len() + right.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&left, &right) as f64 / total as f64
}

fn matching_characters(left: &[char], right: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, left.len(), 0, right.len())];
    while let Some((left_lo, left_hi, right_lo, right_hi)) = pending.pop() {
        let (i, j, size) = longest_block(left, right, left_lo, left_hi, right_lo, right_hi);
        if size == 0 {
            continue;
        }
        matched += size;
        if left_lo < i && right_lo < j {
            pending.push((left_lo, i, right_lo, j));
        }
        if i + size < left_hi && j + size < right_hi {
            pending.push((i + size, left_hi, j + size, right_hi));
        }
    }
    matched
}

/// Longest common block within the given windows as `(left_start,
/// right_start, len)`. Ties go to the block starting earliest in `left`, then
/// earliest in `right`.
fn longest_block(
    left: &[char],
    right: &[char],
    left_lo: usize,
    left_hi: usize,
    right_lo: usize,
    right_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (left_lo, right_lo, 0);
    let width = right_hi - right_lo + 1;
    // run_lengths[x] is the length of the block ending at right[right_lo + x - 1].
    let mut previous = vec![0usize; width];
    let mut current = vec![0usize; width];
    for i in left_lo..left_hi {
        for j in right_lo..right_hi {
            let x = j - right_lo + 1;
            if left[i] == right[j] {
                let run = previous[x - 1] + 1;
                current[x] = run;
                if run > best_size {
                    best_i = i + 1 - run;
                    best_j = j + 1 - run;
                    best_size = run;
                }
            } else {
                current[x] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }
    (best_i, best_j, best_size)
}

/// Scores every catalog album against `query` and returns the strictly best
/// one. The query gets the same normalization as catalog keys; ties keep the
/// album inserted first.
pub fn resolve_album(catalog: &Catalog, query: &str) -> MatchResult {
    let normalized_query = normalize_album_key(query);
    if normalized_query.is_empty() {
        return MatchResult::no_match();
    }

    let mut best = MatchResult::no_match();
    for (key, id) in catalog.albums() {
        let score = similarity_ratio(key, &normalized_query);
        if score > best.score {
            best = MatchResult {
                id: Some(id.to_string()),
                matched_key: key.to_string(),
                score,
            };
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::{resolve_album, similarity_ratio};
    use crate::catalog::Catalog;

    fn catalog(entries: &[(&str, &str, &str)]) -> Catalog {
        let mut catalog = Catalog::new();
        for (key, id, artist) in entries {
            catalog.insert(key.to_string(), id.to_string(), artist.to_string());
        }
        catalog
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_ratio_of_identical_strings_is_one() {
        assert_close(similarity_ratio("joshua tree", "joshua tree"), 1.0);
        assert_close(similarity_ratio("", ""), 1.0);
    }

    #[test]
    fn test_ratio_of_disjoint_strings_is_zero() {
        assert_close(similarity_ratio("abc", "xyz"), 0.0);
        assert_close(similarity_ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_ratio_counts_blocks_on_both_sides_of_longest_match() {
        assert_close(similarity_ratio("joshua tree", "joshua"), 12.0 / 17.0);
        // "abcd" vs "bcda": longest block "bcd", nothing usable on either side.
        assert_close(similarity_ratio("abcd", "bcda"), 0.75);
        // "abxcd" vs "abcd": "ab" then "cd" to its right.
        assert_close(similarity_ratio("abxcd", "abcd"), 8.0 / 9.0);
    }

    #[test]
    fn test_ratio_breaks_block_ties_by_left_position() {
        // "ab" and "cd" tie; "ab" starts earlier in the left string and wins,
        // leaving "cd" with nothing to pair against on the right.
        assert_close(similarity_ratio("abcd", "cdab"), 0.5);
    }

    #[test]
    fn test_exact_key_resolves_with_full_score() {
        let catalog = catalog(&[
            ("boy", "1000000", "U2"),
            ("joshua tree", "1000001", "U2"),
            ("war", "1000002", "U2"),
        ]);

        let result = resolve_album(&catalog, "joshua tree");

        assert_eq!(result.id.as_deref(), Some("1000001"));
        assert_eq!(result.matched_key, "joshua tree");
        assert_close(result.score, 1.0);
    }

    #[test]
    fn test_partial_query_resolves_below_full_score() {
        let catalog = catalog(&[("joshua tree", "1000001", "U2")]);

        let result = resolve_album(&catalog, "joshua");

        assert_eq!(result.id.as_deref(), Some("1000001"));
        assert!(result.score > 0.0 && result.score < 1.0);
    }

    #[test]
    fn test_query_is_normalized_like_catalog_keys() {
        let catalog = catalog(&[("joshua tree remastered", "1000001", "U2")]);

        let result = resolve_album(&catalog, "  Joshua Tree (Remastered)!");

        assert_eq!(result.id.as_deref(), Some("1000001"));
        assert_close(result.score, 1.0);
    }

    #[test]
    fn test_empty_catalog_never_matches() {
        let result = resolve_album(&Catalog::new(), "joshua tree");

        assert!(!result.is_match());
        assert_eq!(result.matched_key, "");
        assert_close(result.score, 0.0);
    }

    #[test]
    fn test_dissimilar_query_does_not_match() {
        let catalog = catalog(&[("abba gold", "1000001", "ABBA")]);

        let result = resolve_album(&catalog, "xyz");

        assert!(!result.is_match());
    }

    #[test]
    fn test_query_without_permitted_characters_does_not_match() {
        let catalog = catalog(&[("abba gold", "1000001", "ABBA")]);

        assert!(!resolve_album(&catalog, "?!").is_match());
    }

    #[test]
    fn test_equal_scores_keep_first_inserted_album() {
        let catalog = catalog(&[("abc", "1000001", "First"), ("abd", "1000002", "Second")]);

        let result = resolve_album(&catalog, "ab");

        assert_eq!(result.id.as_deref(), Some("1000001"));
        assert_eq!(result.matched_key, "abc");
    }
}
