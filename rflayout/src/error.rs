//! Engine result and error types.
//!
//! Every error is terminal for the design being processed: all of them
//! indicate malformed input rather than a transient condition, so nothing
//! is retried internally. The pipeline keeps checking unrelated components
//! after a failure and hands the caller the full [`ErrorReport`].

use std::fmt;

use arcstr::ArcStr;
use thiserror::Error;

use crate::component::GenError;
use crate::layout::placement::PlaceError;
use crate::layout::validate::Violations;

pub type Result<T> = std::result::Result<T, Error>;

/// Any failure the engine reports for a design.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A component's generator rejected its parameters or layer bindings.
    #[error("error generating component `{component}` ({kind}): {source}")]
    Generate {
        component: ArcStr,
        kind: ArcStr,
        #[source]
        source: GenError,
    },

    /// The placement resolver could not assign a unique transform.
    #[error("error resolving placement: {0}")]
    Place(#[from] PlaceError),

    /// Structural checks failed; lists every violation found.
    #[error("invalid layout: {0}")]
    Validation(#[from] Violations),

    /// An internal invariant was broken.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Every error found in one pipeline run.
///
/// Generator failures, structural violations, and placement errors for
/// independent components do not mask one another; the report lists them
/// all, each naming the offending component and port.
#[derive(Debug)]
pub struct ErrorReport {
    errors: Vec<Error>,
}

impl ErrorReport {
    pub(crate) fn new(errors: Vec<Error>) -> Self {
        Self { errors }
    }

    /// The collected errors, in pipeline order: generation failures first,
    /// then structural violations, then placement errors.
    #[inline]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Consumes the report, returning the collected errors.
    #[inline]
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s) processing design", self.errors.len())?;
        for err in &self.errors {
            write!(f, "\n  - {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}
