//! Where candidate places come from.

use crate::cli::Args;
use async_trait::async_trait;
use clap::ValueEnum;
use errors::PlaceSourceError;
use models::{Place, PlaceQuery};
use overpass::OverpassPlaceSource;
use std::sync::Arc;
use std::time::Duration;
use synthetic::SyntheticPlaceSource;

pub mod errors;
pub mod models;
pub mod overpass;
pub mod retry;
pub mod synthetic;

#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn nearby(&self, query: &PlaceQuery) -> Result<Vec<Place>, PlaceSourceError>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlaceSourceKind {
    Overpass,
    Synthetic,
}

pub fn init(args: &Args) -> Result<Arc<dyn PlaceSource>, PlaceSourceError> {
    let source: Arc<dyn PlaceSource> = match args.place_source {
        PlaceSourceKind::Overpass => Arc::new(OverpassPlaceSource::new(
            args.overpass_url.clone(),
            Duration::from_secs(args.upstream_timeout_secs),
            args.retry_policy(),
        )?),
        PlaceSourceKind::Synthetic => Arc::new(SyntheticPlaceSource::new(
            args.synthetic_seed,
            args.synthetic_missing_location_ratio,
        )?),
    };
    tracing::info!(place_source = source.name(), "Initialized place source.");
    Ok(source)
}
