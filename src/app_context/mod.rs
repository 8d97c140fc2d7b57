use crate::cli::Args;
use crate::geo::travel::TravelSpeeds;
use crate::places::errors::PlaceSourceError;
use crate::places::{self, PlaceSource};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub places: Arc<dyn PlaceSource>,
    pub speeds: TravelSpeeds,
    pub search: SearchSettings,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchSettings {
    pub radius_m: u32,
    pub max_results: usize,
}

pub fn init(args: &Args) -> Result<AppContext, PlaceSourceError> {
    Ok(AppContext {
        places: places::init(args)?,
        speeds: args.travel_speeds(),
        search: SearchSettings {
            radius_m: args.search_radius_m,
            max_results: args.max_results,
        },
    })
}

#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: String,
    pub client_ip: String,
}
