pub mod client;
pub mod fetchers;
pub mod model;
pub mod slack;
