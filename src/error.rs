use thiserror::Error;

#[derive(Debug, Error)]
pub enum PodiumError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("configuration error in {context}: {message}")]
    Config {
        context: &'static str,
        message: String,
    },
}

impl PodiumError {
    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub fn config(context: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            context,
            message: message.into(),
        }
    }
}
