//! Closest-match suggestions for mistyped identifiers

use strsim::jaro_winkler;

const MIN_SIMILARITY: f64 = 0.8;

/// Returns the candidate most similar to `input`, if any is close enough
pub fn closest_match<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let input = input.to_lowercase();
    candidates
        .into_iter()
        .map(|candidate| (candidate, jaro_winkler(&input, candidate)))
        .filter(|(_, score)| *score >= MIN_SIMILARITY)
        // ties keep the earliest candidate so suggestions stay stable
        .fold(None, |best: Option<(&str, f64)>, (candidate, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((candidate, score)),
        })
        .map(|(candidate, _)| candidate)
}
