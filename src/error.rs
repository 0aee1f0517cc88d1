use thiserror::Error;

use crate::config::ConfigError;
use crate::FactsError;

/// Unified error type covering fact assembly, configuration, and I/O.
///
/// Returned by convenience loaders like
/// [`EngineConfig::from_file()`](crate::EngineConfig::from_file). Rule and
/// discount evaluation never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Facts(#[from] FactsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
