use strsim::jaro_winkler;

/// Minimum similarity score (Jaro-Winkler) required for a candidate label to
/// be offered as a suggestion on a not-found outcome.
pub const MIN_LABEL_SIMILARITY: f64 = 0.85;

/// Comparison key for a raw label: trimmed, lowercased, ASCII alphanumerics
/// only, so punctuation and spacing differences don't mask a near match.
fn label_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// The closest candidate to `input` whose normalized key clears the
/// similarity threshold. Candidates equal to the input are never suggested;
/// the lookup that failed was exact, so echoing the input back is useless.
pub fn closest_label<'a, I>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = label_key(input);
    if needle.is_empty() {
        return None;
    }

    let mut best: Option<(f64, &str)> = None;
    for candidate in candidates {
        if candidate == input {
            continue;
        }
        let score = jaro_winkler(&needle, &label_key(candidate));
        if score >= MIN_LABEL_SIMILARITY && best.map_or(true, |(top, _)| score > top) {
            best = Some((score, candidate));
        }
    }

    best.map(|(_, candidate)| candidate.to_string())
}
