mod config;
mod query;
mod ticket;

pub use self::config::*;
pub use self::query::*;
pub use self::ticket::*;
