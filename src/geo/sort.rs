use std::cmp::Ordering;

/// Anything that may carry a distance from the search origin.
pub trait Measured {
    fn distance_km(&self) -> Option<f64>;
}

/// Sorts closest first. Entries without a distance go last and keep their
/// relative input order.
pub fn sort_by_distance<T: Measured>(results: &mut [T]) {
    results.sort_by(|a, b| compare_distances(a.distance_km(), b.distance_km()));
}

fn compare_distances(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
