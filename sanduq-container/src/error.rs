//! Error types for registration-chain resolution.
//!
//! Resolution has exactly two semantic failure kinds, and they never
//! overlap: [`NotFoundError`] means the requested service has no
//! registrations at all, [`DependencyMissingError`] means it is
//! registered but no reachable implementation could be fully satisfied.
//! Both are fatal to the enclosing resolve call and propagate through any
//! recursion depth without being rewrapped.

use std::fmt;

use sanduq_support::rendering::render_chain;

use crate::key::ServiceKey;

/// Main error type for all Sanduq operations.
#[derive(Debug, thiserror::Error)]
pub enum SanduqError {
    /// The requested service has no registered implementations at all.
    #[error("{}", .0)]
    NotFound(NotFoundError),

    /// The service is registered, but no reachable implementation's
    /// constructor could be fully satisfied.
    #[error("{}", .0)]
    DependencyMissing(DependencyMissingError),

    /// A committed constructor failed while building the instance.
    #[error("failed to construct {key}: {source}")]
    Construction {
        key: ServiceKey,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Error when a service was never registered.
#[derive(Debug)]
pub struct NotFoundError {
    /// The service that was requested.
    pub requested: ServiceKey,
    /// Name discriminator of a named lookup, if one was used.
    pub name: Option<String>,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(
                f,
                "no service for {} named {name:?} could be found",
                self.requested
            ),
            None => write!(f, "no service for {} could be found", self.requested),
        }
    }
}

/// Error when a registered service could not be resolved.
///
/// Distinct from [`NotFoundError`]: there was at least one candidate to
/// attempt. `requested` names the service whose resolution failed, which
/// for a deeply nested failure is the service deepest in the graph — the
/// error is propagated unchanged from where it arose.
#[derive(Debug)]
pub struct DependencyMissingError {
    /// The service whose resolution failed.
    pub requested: ServiceKey,
    pub cause: MissingCause,
}

/// Why a registered service could not be satisfied.
#[derive(Debug)]
pub enum MissingCause {
    /// A constructor parameter names a service with no registrations.
    Unregistered(ServiceKey),
    /// A self-referential parameter ran past the end of the registration
    /// chain.
    ChainExhausted {
        /// The full chain registered for the service, in order.
        chain: Vec<ServiceKey>,
    },
    /// The implementation exposes no constructor signature at all.
    NoConstructor,
}

impl fmt::Display for DependencyMissingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not satisfy a dependency of {}: ", self.requested)?;
        match &self.cause {
            MissingCause::Unregistered(parameter) => {
                write!(f, "required service {parameter} is not registered")
            }
            MissingCause::ChainExhausted { chain } => {
                let links: Vec<String> = chain.iter().map(ServiceKey::short_name).collect();
                write!(
                    f,
                    "registration chain exhausted after {} candidate(s): {}",
                    chain.len(),
                    render_chain(&links)
                )
            }
            MissingCause::NoConstructor => write!(f, "no usable constructor signature"),
        }
    }
}

/// Convenient Result type for Sanduq operations.
pub type Result<T> = std::result::Result<T, SanduqError>;
