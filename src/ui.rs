//! Terminal presentation for the announcement carousel

pub mod banner;
