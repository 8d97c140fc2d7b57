use crate::geo;
use crate::places::errors::PlaceSourceError;
use crate::places::models::{Place, PlaceQuery};
use crate::places::PlaceSource;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use uuid::Builder;

const NAME_PREFIXES: &[&str] = &[
    "Corner", "Central", "Old Town", "Riverside", "Sunny", "Green", "Royal", "Little", "Harbour",
    "Market",
];

/// Fake place source that scatters candidates around the origin.
///
/// Points are spread uniformly over the search disc. With a seed the output
/// depends only on the query, which keeps tests and demos reproducible.
pub struct SyntheticPlaceSource {
    seed: Option<u64>,
    missing_location_ratio: f64,
}

impl SyntheticPlaceSource {
    pub fn new(seed: Option<u64>, missing_location_ratio: f64) -> Result<Self, PlaceSourceError> {
        if !(0.0..=1.0).contains(&missing_location_ratio) {
            return Err(PlaceSourceError::Config(format!(
                "missing location ratio must be within [0, 1], got {missing_location_ratio}"
            )));
        }
        Ok(Self {
            seed,
            missing_location_ratio,
        })
    }

    pub fn generate(&self, query: &PlaceQuery) -> Vec<Place> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let radius_km = f64::from(query.radius_m) / geo::consts::METERS_PER_KM;
        let label = category_label(&query.category);

        (0..query.limit)
            .map(|_| {
                let id = Builder::from_random_bytes(rng.gen()).into_uuid();
                let prefix = NAME_PREFIXES[rng.gen_range(0..NAME_PREFIXES.len())];
                let bearing = rng.gen_range(0.0..360.0);
                let distance_km = radius_km * rng.gen::<f64>().sqrt();
                let location = if rng.gen_bool(self.missing_location_ratio) {
                    None
                } else {
                    Some(geo::destination(query.origin, bearing, distance_km))
                };
                Place {
                    id: format!("synthetic/{id}"),
                    name: Some(format!("{prefix} {label}")),
                    category: query.category.clone(),
                    location,
                    address: None,
                    tags: BTreeMap::new(),
                }
            })
            .collect()
    }
}

#[async_trait]
impl PlaceSource for SyntheticPlaceSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn nearby(&self, query: &PlaceQuery) -> Result<Vec<Place>, PlaceSourceError> {
        Ok(self.generate(query))
    }
}

/// `fitness_centre` -> `Fitness centre`
fn category_label(category: &str) -> String {
    let spaced = category.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}
