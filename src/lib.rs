pub mod coerce;
pub mod config;
pub mod export;
pub mod feed;
pub mod fetch;
pub mod http_cache;
pub mod http_client;
pub mod join;
pub mod logging;
pub mod normalize;
pub mod ordering;
pub mod panels;
pub mod pipeline;
pub mod presentation;
pub mod record;
pub mod schema;
pub mod selection;
pub mod state;
pub mod watchlist;
