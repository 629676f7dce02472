// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error handling facilities for the Flotilla control plane

use crate::api::ResourceType;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;

/// An error that can be generated within a control plane component
///
/// These may be generated while handling a client request or as part of
/// background operation (e.g., while a reconciler evaluates whether a
/// resource may be applied).  General best practices for error design apply
/// here: where possible, we want to reuse existing variants rather than
/// inventing new ones to distinguish cases that no programmatic consumer
/// needs to distinguish.
#[derive(Clone, Debug, Deserialize, thiserror::Error, PartialEq, Serialize)]
pub enum Error {
    /// An object needed as part of this operation was not found.
    #[error("Object (of type {lookup_type:?}) not found: {type_name}")]
    ObjectNotFound { type_name: ResourceType, lookup_type: LookupType },
    /// The specified input field is not valid.
    #[error("Invalid Value: {label}, {message}")]
    InvalidValue { label: String, message: String },
    /// The system encountered an unhandled operational error.
    #[error("Internal Error: {internal_message}")]
    InternalError { internal_message: String },
    /// The system (or part of it) is unavailable.
    #[error("Service Unavailable: {internal_message}")]
    ServiceUnavailable { internal_message: String },
}

/// Indicates how an object was looked up (for an `ObjectNotFound` error)
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum LookupType {
    /// a specific name was requested
    ByName(String),
}

impl LookupType {
    /// Returns an ObjectNotFound error appropriate for the case where this
    /// lookup failed
    pub fn into_not_found(self, type_name: ResourceType) -> Error {
        Error::ObjectNotFound { type_name, lookup_type: self }
    }
}

impl From<&str> for LookupType {
    fn from(name: &str) -> Self {
        LookupType::ByName(name.to_owned())
    }
}

impl Error {
    /// Returns whether the error is likely transient and could reasonably be
    /// retried
    pub fn retryable(&self) -> bool {
        match self {
            Error::ServiceUnavailable { .. } => true,

            Error::ObjectNotFound { .. }
            | Error::InvalidValue { .. }
            | Error::InternalError { .. } => false,
        }
    }

    /// Generates an [`Error::ObjectNotFound`] error for a lookup by object
    /// name.
    pub fn not_found_by_name(type_name: ResourceType, name: &str) -> Error {
        LookupType::from(name).into_not_found(type_name)
    }

    /// Generates an [`Error::InternalError`] error with the specific message
    ///
    /// InternalError should be used for operational conditions that should
    /// not happen but that we cannot reasonably handle at runtime (e.g.,
    /// an object read from the store that fails to decode).
    pub fn internal_error(internal_message: &str) -> Error {
        Error::InternalError { internal_message: internal_message.to_owned() }
    }

    /// Generates an [`Error::ServiceUnavailable`] error with the specific
    /// message
    ///
    /// This should be used for transient failures where the caller might be
    /// expected to retry.  Logic errors or other problems indicating that a
    /// retry would not work should probably be an InternalError (if it's a
    /// server problem) or InvalidValue (if it's a client problem) instead.
    pub fn unavail(message: &str) -> Error {
        Error::ServiceUnavailable { internal_message: message.to_owned() }
    }

    /// Given an [`Error`] with an internal message, return the same error
    /// with `context` prepended to it to provide more context
    ///
    /// If the error has no internal message, then it is returned unchanged.
    pub fn internal_context<C>(self, context: C) -> Error
    where
        C: Display + Send + Sync + 'static,
    {
        match self {
            Error::ObjectNotFound { .. } | Error::InvalidValue { .. } => self,
            Error::InternalError { internal_message } => Error::InternalError {
                internal_message: format!("{}: {}", context, internal_message),
            },
            Error::ServiceUnavailable { internal_message } => {
                Error::ServiceUnavailable {
                    internal_message: format!(
                        "{}: {}",
                        context, internal_message
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::Error;
    use super::LookupType;
    use crate::api::ResourceType;

    #[test]
    fn test_not_found_by_name() {
        let error = Error::not_found_by_name(ResourceType::Project, "demo");
        assert_eq!(
            error,
            Error::ObjectNotFound {
                type_name: ResourceType::Project,
                lookup_type: LookupType::ByName("demo".to_string()),
            }
        );
        assert!(!error.retryable());
    }

    #[test]
    fn test_retryable() {
        assert!(Error::unavail("store is resyncing").retryable());
        assert!(!Error::internal_error("decode failure").retryable());
    }

    #[test]
    fn test_internal_context() {
        let error = Error::unavail("store is resyncing")
            .internal_context("loading project \"demo\"");
        assert_eq!(
            error,
            Error::ServiceUnavailable {
                internal_message: "loading project \"demo\": store is \
                 resyncing"
                    .to_string()
            }
        );

        // Errors without an internal message pass through unchanged.
        let error = Error::not_found_by_name(ResourceType::Project, "demo");
        assert_eq!(error.clone().internal_context("ignored"), error);
    }
}
