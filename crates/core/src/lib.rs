pub mod aggregate;
pub mod config;
pub mod error;
pub mod normalize;
pub mod term;

pub use aggregate::{aggregate, parse_line, TermAggregator};
pub use config::Config;
pub use error::*;
pub use normalize::normalize_term;
pub use term::*;
