//! Request-scoped subject binding.
//!
//! A verified [`Subject`] travels with the request that carried its token.
//! [`attach`] consumes a request and hands back the bound one, so the binding
//! is threaded explicitly through the handler chain. The accessors work on a
//! full request or on its [`Parts`], which is what extractors see.

use http::request::Parts;
use http::Extensions;
use http::Request;
use thiserror::Error;

use crate::jwt::Subject;

/// Error type for request context lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("No authenticated subject bound to request")]
    SubjectNotFound,

    #[error("Principal type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },
}

/// Anything that carries request extensions.
pub trait SubjectCarrier {
    fn carried_extensions(&self) -> &Extensions;
}

impl<B> SubjectCarrier for Request<B> {
    fn carried_extensions(&self) -> &Extensions {
        self.extensions()
    }
}

impl SubjectCarrier for Parts {
    fn carried_extensions(&self) -> &Extensions {
        &self.extensions
    }
}

impl SubjectCarrier for Extensions {
    fn carried_extensions(&self) -> &Extensions {
        self
    }
}

/// Bind a subject to a request.
pub fn attach<B>(mut request: Request<B>, subject: Subject) -> Request<B> {
    request.extensions_mut().insert(subject);
    request
}

/// # Errors
/// * `SubjectNotFound` - Request was never authenticated
pub fn subject_of<R: SubjectCarrier + ?Sized>(request: &R) -> Result<&Subject, ContextError> {
    request
        .carried_extensions()
        .get::<Subject>()
        .ok_or(ContextError::SubjectNotFound)
}

pub fn namespace_of<R: SubjectCarrier + ?Sized>(request: &R) -> Result<&str, ContextError> {
    subject_of(request).map(Subject::namespace)
}

pub fn principal_type_of<R: SubjectCarrier + ?Sized>(request: &R) -> Result<&str, ContextError> {
    subject_of(request).map(Subject::principal_type)
}

/// Principal id of the bound subject, if it has the expected type.
///
/// This is the per-endpoint guard: an endpoint serving only customers asks
/// for `"customer"` and refuses everything else.
///
/// # Errors
/// * `SubjectNotFound` - Request was never authenticated
/// * `TypeMismatch` - Bound subject has a different principal type
pub fn principal_id_of<R: SubjectCarrier + ?Sized>(
    request: &R,
    expected_type: &str,
) -> Result<u64, ContextError> {
    let subject = subject_of(request)?;

    if subject.principal_type() != expected_type {
        return Err(ContextError::TypeMismatch {
            expected: expected_type.to_string(),
            actual: subject.principal_type().to_string(),
        });
    }

    Ok(subject.principal_id())
}
