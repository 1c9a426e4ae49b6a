use std::path::PathBuf;

/// The connection could not even be started.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("could not reach websocket api at {uri}: {reason}")]
    Connect { uri: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
