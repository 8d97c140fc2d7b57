//! The nearby places lookup: validate, fetch candidates, measure, sort.

pub mod consts;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod requests;
pub mod responses;
pub mod service;
#[cfg(test)]
mod tests;
