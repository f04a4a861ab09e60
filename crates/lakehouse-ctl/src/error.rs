//! Error type for `lakehouse-ctl` command handlers.

use lakehouse_sdk::GeneratorError;

pub(crate) type CtlResult<T> = Result<T, CtlError>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CtlError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("configuration error in '{key}': {source}")]
    Config {
        key: &'static str,
        source: GeneratorError,
    },
}
