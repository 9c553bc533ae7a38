//! Command-line and environment configuration.

use std::net::IpAddr;

use clap::Parser;
use clap::builder::BoolishValueParser;

use super::{Config, LOOSE_DEFAULT_PORT, STRICT_DEFAULT_PORT, ServiceOptions};
use crate::db::MongoConfig;

/// Storage backend selected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo(MongoConfig),
    Memory,
}

/// Server arguments.
///
/// Every flag falls back to an environment variable, then to the preset
/// chosen by `--strict`.
#[derive(Parser, Debug)]
#[command(name = "projects-api")]
#[command(author, version, about = "Project listings API server", long_about = None)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on (default: 5545, or 5000 with --strict)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// MongoDB connection string
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://127.0.0.1:27017")]
    pub mongo_uri: String,

    /// Database name used when the connection string names none
    #[arg(long, env = "MONGO_DB", default_value = "test")]
    pub database: String,

    /// Use the strict preset: required fields, type route, no CORS
    #[arg(long, env = "STRICT_VALIDATION")]
    pub strict: bool,

    /// Expose GET /projects/{type} (default: follows --strict)
    #[arg(
        long,
        env = "TYPE_FILTER",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub type_filter: Option<bool>,

    /// Send permissive CORS headers (default: on unless --strict)
    #[arg(
        long,
        env = "CORS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub cors: Option<bool>,

    /// Keep records in process memory instead of MongoDB
    #[arg(long)]
    pub in_memory: bool,
}

impl ServeArgs {
    /// Variant toggles after applying overrides to the preset.
    pub fn options(&self) -> ServiceOptions {
        let preset = if self.strict {
            ServiceOptions::strict()
        } else {
            ServiceOptions::loose()
        };

        ServiceOptions {
            strict_validation: preset.strict_validation,
            type_filter: self.type_filter.unwrap_or(preset.type_filter),
            cors: self.cors.unwrap_or(preset.cors),
        }
    }

    /// HTTP server configuration.
    pub fn config(&self) -> Config {
        let default_port = if self.strict {
            STRICT_DEFAULT_PORT
        } else {
            LOOSE_DEFAULT_PORT
        };

        Config {
            host: self.host,
            port: self.port.unwrap_or(default_port),
            options: self.options(),
        }
    }

    /// Storage backend to open.
    pub fn store(&self) -> StoreBackend {
        if self.in_memory {
            StoreBackend::Memory
        } else {
            StoreBackend::Mongo(MongoConfig {
                uri: self.mongo_uri.clone(),
                database: self.database.clone(),
            })
        }
    }
}
