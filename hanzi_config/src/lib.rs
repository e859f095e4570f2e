mod schema;

pub use schema::{AnkiConfig, AudioConfig, CONFIG_TEMPLATE, Config, SourcesConfig};
