/// Errors returned when a solver response cannot be turned into a snapshot.
///
/// Both variants are all-or-nothing: no partial snapshot is ever produced.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },
    #[error("group {ordinal} references unknown region {label:?}")]
    UnknownRegionReference { ordinal: usize, label: String },
}

impl ParseError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}
