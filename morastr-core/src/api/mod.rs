//! Public API: mora strings, counting and configuration

pub mod config;
mod count;
mod mora_string;

pub use config::{Config, ConfigBuilder};
pub use count::{count_all, count_all_bytes, count_all_bytes_with, count_all_with};
pub use mora_string::{Iter, MoraString, Needle};
