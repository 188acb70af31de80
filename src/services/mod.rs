pub mod aggregator;
pub mod classifier;
pub mod fetcher;
pub mod m3u_parser;
pub mod playlist_service;
pub mod store;
