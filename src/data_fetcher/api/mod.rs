pub mod feed_source;
mod fetch_utils;
pub mod http_client;
pub mod urls;

pub use feed_source::{FeedSource, HttpFeed};
pub use http_client::create_http_client_with_timeout;
pub use urls::*;
