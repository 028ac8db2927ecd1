use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use web_sys::js_sys::Math;

/// Fisher-Yates shuffle driven by `random`, which must return values in `[0, 1)`.
pub fn shuffle_with<T: Clone>(items: &[T], mut random: impl FnMut() -> f64) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = ((random() * (i + 1) as f64).floor() as usize).min(i);
        shuffled.swap(i, j);
    }
    shuffled
}

pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, Math::random)
}

/// Removes duplicates, keeping first occurrences in order.
pub fn unique<T: Clone + Eq + Hash>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::new();
    items.iter().filter(|item| seen.insert((*item).clone())).cloned().collect()
}

pub fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return Vec::new();
    }
    items.chunks(size).map(<[T]>::to_vec).collect()
}

/// Groups by key, ordered by each key's first appearance.
pub fn group_by<T: Clone, K: PartialEq>(items: &[T], key: impl Fn(&T) -> K) -> Vec<(K, Vec<T>)> {
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(item);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, group)) => group.push(item.clone()),
            None => groups.push((k, vec![item.clone()])),
        }
    }
    groups
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Stable sort by `key`. Keys that cannot be compared keep their order.
pub fn sort_by<T: Clone, K: PartialOrd>(items: &[T], key: impl Fn(&T) -> K, direction: SortDirection) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}
