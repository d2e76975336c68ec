use thiserror::Error;

/// Errors that can occur while parsing configuration or test documents.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML error: {0}")]
    Xml(String),

    #[error("Missing element '{0}'")]
    MissingElement(String),

    #[error("Element '{element}' is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("Empty Rule element under {event_type}/{match_type}")]
    EmptyRule {
        event_type: String,
        match_type: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ParseError>;
