//! engine::outcome
//!
//! Classification of gateway responses.
//!
//! # Rules
//!
//! Applied in this order to every gateway response:
//!
//! 1. The warnings are appended to the invocation's [`WarningLog`]
//! 2. `Error` stops the command with that error
//! 3. `NotFound` on a lookup lets the command report "does not exist" and
//!    finish successfully; on a required entity it is an error
//! 4. `Success` hands the payload to the next step
//!
//! The log is flushed by the executor before the terminal outcome is
//! rendered, whatever that outcome is.

use crate::api::{ApiError, RemoteOutcome, Response};
use crate::ui::Ui;

/// Warnings accumulated across the gateway calls of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningLog {
    warnings: Vec<String>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append warnings in receipt order.
    pub fn extend<I: IntoIterator<Item = String>>(&mut self, warnings: I) {
        self.warnings.extend(warnings);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.warnings
    }

    /// Write every warning to the secondary stream and clear the log.
    pub fn flush(&mut self, ui: &mut Ui) {
        ui.display_warnings(&self.warnings);
        self.warnings.clear();
    }
}

/// Classify a lookup response.
///
/// Returns `Ok(None)` when the entity does not exist.
pub fn classify_lookup<T>(
    response: Response<T>,
    log: &mut WarningLog,
) -> Result<Option<T>, ApiError> {
    log.extend(response.warnings);
    match response.outcome {
        RemoteOutcome::Error(err) => Err(err),
        RemoteOutcome::NotFound => Ok(None),
        RemoteOutcome::Success(value) => Ok(Some(value)),
    }
}

/// Classify a response whose entity must exist.
///
/// `NotFound` becomes `ApiError::NotFound(entity)`.
pub fn require<T>(
    response: Response<T>,
    log: &mut WarningLog,
    entity: &str,
) -> Result<T, ApiError> {
    classify_lookup(response, log)?.ok_or_else(|| ApiError::NotFound(entity.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_wins_and_warnings_are_kept() {
        let mut log = WarningLog::new();
        let response: Response<u32> =
            Response::error(ApiError::Message("boom".into())).with_warnings(["w1", "w2"]);

        let err = classify_lookup(response, &mut log).unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(log.as_slice(), ["w1", "w2"]);
    }

    #[test]
    fn not_found_is_none_for_lookups() {
        let mut log = WarningLog::new();
        let result = classify_lookup(Response::<u32>::not_found(), &mut log).unwrap();
        assert_eq!(result, None);
        assert!(log.is_empty());
    }

    #[test]
    fn not_found_is_error_when_required() {
        let mut log = WarningLog::new();
        let err = require(Response::<u32>::not_found(), &mut log, "User bob").unwrap_err();
        assert_eq!(err, ApiError::NotFound("User bob".into()));
    }

    #[test]
    fn warnings_accumulate_in_receipt_order() {
        let mut log = WarningLog::new();
        classify_lookup(Response::success(1).with_warnings(["a"]), &mut log).unwrap();
        classify_lookup(Response::success(2).with_warnings(["b", "c"]), &mut log).unwrap();
        assert_eq!(log.as_slice(), ["a", "b", "c"]);
    }

    #[test]
    fn flush_writes_to_secondary_and_clears() {
        let (mut ui, streams) = Ui::buffered("");
        let mut log = WarningLog::new();
        log.extend(vec!["one".to_string(), "two".to_string()]);

        log.flush(&mut ui);
        assert_eq!(streams.err.contents(), "one\ntwo\n");
        assert_eq!(streams.out.contents(), "");
        assert!(log.is_empty());
    }
}
