//! "Did you mean" suggestions for misspelled names
//!
//! Uses edit distance over a candidate list. Ties go to the candidate seen
//! first, so results follow the caller's iteration order.

/// The candidate with the smallest edit distance to `word`
pub fn did_you_mean<'a, I>(word: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(usize, &'a str)> = None;
    for candidate in candidates {
        let distance = levenshtein_distance(word, candidate);
        match best {
            // strict less-than keeps the first candidate on ties
            Some((d, _)) if distance >= d => {}
            _ => best = Some((distance, candidate)),
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// Every candidate sharing the smallest edit distance to `word`, in input order
pub fn closest_matches<'a, I>(word: &str, candidates: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let scored: Vec<(usize, &'a str)> = candidates
        .into_iter()
        .map(|c| (levenshtein_distance(word, c), c))
        .collect();

    let Some(min) = scored.iter().map(|(d, _)| *d).min() else {
        return Vec::new();
    };

    scored
        .into_iter()
        .filter(|(d, _)| *d == min)
        .map(|(_, c)| c)
        .collect()
}

/// Levenshtein distance over chars
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row = vec![0; b_len + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (curr_row[j] + 1) // insertion
                .min(prev_row[j + 1] + 1) // deletion
                .min(prev_row[j] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}
