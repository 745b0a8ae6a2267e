use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required config field: {field}")]
    MissingField { field: &'static str },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
