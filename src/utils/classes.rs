use std::hash::Hash;

/// Invert a map by swapping keys and values
pub fn invert_map<K, V, MK, MV>(original: MK) -> MV
where
    K: Ord + Hash + Eq,
    V: Ord + Hash + Eq + Clone,
    MK: IntoIterator<Item = (K, V)>,
    MV: FromIterator<(V, K)>,
{
    original
        .into_iter()
        .map(|(key, value)| (value, key))
        .collect()
}

/// The index and value of the highest score, preferring the first on ties
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (index, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((index, score)),
        })
}
