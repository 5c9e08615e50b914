//! # The container — the resolving side of Sanduq
//!
//! [`Container`] consumes a fully populated [`ComponentStore`] and builds
//! object graphs from it on demand, recursively resolving every
//! constructor parameter of the implementation it selects.
//!
//! # Registration chains
//!
//! Several implementations may be registered under one service key, in
//! which case the entries form a *chain* walked front to back. A plain
//! resolve takes the first entry. If that implementation's constructor
//! itself asks for the service it is registered under, the parameter is
//! satisfied by the *next* entry down the chain rather than by the entry
//! currently being built — which is how decorators stack:
//!
//! ```text
//! store:   dyn Mailer → [AuditMailer, RetryMailer, SmtpMailer]
//!
//! resolve(dyn Mailer)
//!   └─ AuditMailer(inner: dyn Mailer)        chain position 0
//!        └─ RetryMailer(inner: dyn Mailer)   chain position 1
//!             └─ SmtpMailer                  chain position 2, terminal
//! ```
//!
//! A constructor with two parameters of its own service splits the graph:
//! each parameter walks its own copy of the chain cursor, so neither
//! branch sees how far the other advanced.
//!
//! # Concurrency
//!
//! `Container` is `Send + Sync`. Resolution is synchronous and each call
//! owns its chain-cursor state, so concurrent resolves against one
//! container are safe. A chain whose every entry is self-referential ends
//! in a dependency-missing failure; a registration *cycle* across
//! different services (A needs B, B needs A) is a configuration error
//! this engine does not detect and will recurse on without bound.
//!
//! # Examples
//!
//! ```
//! use sanduq_container::container::Container;
//! use sanduq_container::descriptor::{Constructible, ConstructorSignature};
//! use sanduq_container::store::ComponentStore;
//!
//! trait Greeter: Send + Sync {}
//!
//! struct PlainGreeter;
//! impl Greeter for PlainGreeter {}
//!
//! impl Constructible for PlainGreeter {
//!     fn signatures() -> Vec<ConstructorSignature> {
//!         vec![ConstructorSignature::new(vec![], |_| Ok(Box::new(PlainGreeter)))]
//!     }
//! }
//!
//! let mut store = ComponentStore::new();
//! store.add::<dyn Greeter, PlainGreeter>();
//!
//! let container = Container::new(store);
//! let greeter = container.resolve::<dyn Greeter>().expect("registered");
//! assert!(greeter.is::<PlainGreeter>());
//! ```

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::descriptor::{Arguments, ConstructorSignature, ImplementationDescriptor, ServiceInstance};
use crate::error::{DependencyMissingError, MissingCause, NotFoundError, Result, SanduqError};
use crate::key::ServiceKey;
use crate::store::ComponentStore;

// ============================================================
// ChainCursors
// ============================================================

/// Per-call chain positions: for each service currently being expanded
/// along its registration chain, the index of the candidate to use next.
///
/// Created fresh for every top-level resolve and threaded through the
/// recursion by value. Branching into a constructor parameter clones the
/// map, so sibling parameters never observe each other's advancement, and
/// a cursor only ever moves forward within one branch.
#[derive(Clone, Default)]
struct ChainCursors {
    positions: HashMap<ServiceKey, usize>,
}

impl ChainCursors {
    /// Position to use for `key`; services not currently being chain-
    /// expanded start at the front.
    fn position(&self, key: &ServiceKey) -> usize {
        self.positions.get(key).copied().unwrap_or(0)
    }

    /// A branch of this context with `key` moved to `position`.
    fn descend(&self, key: &ServiceKey, position: usize) -> Self {
        let mut branch = self.clone();
        branch.positions.insert(key.clone(), position);
        branch
    }

    /// A fresh context with a single pinned position, for resolving one
    /// specific chain entry.
    fn pinned(key: &ServiceKey, position: usize) -> Self {
        Self::default().descend(key, position)
    }
}

// ============================================================
// Container
// ============================================================

/// Immutable, thread-safe constructor-injection resolver.
///
/// Owns the [`ComponentStore`] it was created from; the store is
/// read-only from that point on.
pub struct Container {
    store: ComponentStore,
}

impl Container {
    /// Wraps a fully populated store.
    pub fn new(store: ComponentStore) -> Self {
        debug!(registered = store.len(), "container ready");
        Self { store }
    }

    /// Resolves one instance of the service `S` from the top of its chain.
    pub fn resolve<S: ?Sized + 'static>(&self) -> Result<ServiceInstance> {
        self.resolve_key(&ServiceKey::of::<S>())
    }

    /// Like [`resolve`](Container::resolve), with a name discriminator
    /// carried into the not-found error. The name never affects lookup.
    pub fn resolve_named<S: ?Sized + 'static>(&self, name: &str) -> Result<ServiceInstance> {
        self.resolve_key_named(&ServiceKey::of::<S>(), name)
    }

    /// One instance per implementation registered for `S`, in
    /// registration order.
    pub fn resolve_all<S: ?Sized + 'static>(&self) -> Result<Vec<ServiceInstance>> {
        self.resolve_all_key(&ServiceKey::of::<S>())
    }

    /// Type-erased entry point for [`resolve`](Container::resolve).
    #[instrument(skip_all, fields(service = %key))]
    pub fn resolve_key(&self, key: &ServiceKey) -> Result<ServiceInstance> {
        self.resolve_chained(key, &ChainCursors::default())
    }

    /// Type-erased entry point for [`resolve_named`](Container::resolve_named).
    #[instrument(skip_all, fields(service = %key, name = %name))]
    pub fn resolve_key_named(&self, key: &ServiceKey, name: &str) -> Result<ServiceInstance> {
        if self.store.try_get(key).is_none() {
            return Err(SanduqError::NotFound(NotFoundError {
                requested: key.clone(),
                name: Some(name.to_owned()),
            }));
        }
        self.resolve_chained(key, &ChainCursors::default())
    }

    /// Type-erased entry point for [`resolve_all`](Container::resolve_all).
    ///
    /// Each registered implementation is resolved independently, pinned at
    /// its own chain position; its self-referential parameters continue
    /// from the entry below it. The first failing candidate fails the
    /// whole call — there is no partial result.
    #[instrument(skip_all, fields(service = %key))]
    pub fn resolve_all_key(&self, key: &ServiceKey) -> Result<Vec<ServiceInstance>> {
        let count = self.registered(key)?.len();
        (0..count)
            .map(|position| self.resolve_chained(key, &ChainCursors::pinned(key, position)))
            .collect()
    }

    // ── Resolution core ──

    fn registered(&self, key: &ServiceKey) -> Result<&[ImplementationDescriptor]> {
        self.store.try_get(key).ok_or_else(|| {
            SanduqError::NotFound(NotFoundError {
                requested: key.clone(),
                name: None,
            })
        })
    }

    /// Recursive resolution of `key` at its current chain position.
    fn resolve_chained(&self, key: &ServiceKey, cursors: &ChainCursors) -> Result<ServiceInstance> {
        let candidates = self.registered(key)?;
        let position = cursors.position(key);

        let Some(descriptor) = candidates.get(position) else {
            // The service is registered; its chain is just not deep enough
            // to satisfy this self-reference.
            return Err(SanduqError::DependencyMissing(DependencyMissingError {
                requested: key.clone(),
                cause: MissingCause::ChainExhausted {
                    chain: candidates.iter().map(|c| c.key().clone()).collect(),
                },
            }));
        };

        trace!(service = %key, position, implementation = %descriptor.key(), "selected candidate");
        self.construct_candidate(key, position, descriptor, cursors)
    }

    /// Tries the candidate's constructor signatures in declared order and
    /// commits to the first one whose parameters all resolve. Signatures
    /// are evaluated independently; a later signature never revisits an
    /// earlier one's parameter resolutions.
    fn construct_candidate(
        &self,
        key: &ServiceKey,
        position: usize,
        descriptor: &ImplementationDescriptor,
        cursors: &ChainCursors,
    ) -> Result<ServiceInstance> {
        let mut first_failure = None;

        for signature in descriptor.constructors() {
            match self.resolve_parameters(key, position, signature, cursors) {
                Ok(resolved) => {
                    let mut arguments = Arguments::new(descriptor.key().clone(), resolved);
                    return signature.instantiate(&mut arguments);
                }
                // A constructor that ran and failed is not a selection
                // problem; it aborts the resolve outright.
                Err(err @ SanduqError::Construction { .. }) => return Err(err),
                Err(err) => {
                    if first_failure.is_none() {
                        first_failure = Some(err);
                    }
                }
            }
        }

        Err(match first_failure {
            // A nested dependency-missing failure surfaces unchanged, no
            // matter how deep it arose.
            Some(err @ SanduqError::DependencyMissing(_)) => err,
            // A parameter with no registrations at all: this service does
            // have a candidate, so the resolution fails dependency-missing,
            // not not-found.
            Some(SanduqError::NotFound(inner)) => {
                SanduqError::DependencyMissing(DependencyMissingError {
                    requested: key.clone(),
                    cause: MissingCause::Unregistered(inner.requested),
                })
            }
            Some(err) => err,
            None => SanduqError::DependencyMissing(DependencyMissingError {
                requested: key.clone(),
                cause: MissingCause::NoConstructor,
            }),
        })
    }

    /// Resolves one signature's parameters, each in its own branch of the
    /// cursor map. A parameter naming the service currently being
    /// expanded continues one entry down the same chain; any other
    /// parameter resolves from the top of its own chain.
    fn resolve_parameters(
        &self,
        key: &ServiceKey,
        position: usize,
        signature: &ConstructorSignature,
        cursors: &ChainCursors,
    ) -> Result<Vec<ServiceInstance>> {
        signature
            .parameters()
            .iter()
            .map(|parameter| {
                let branch = if parameter == key {
                    cursors.descend(key, position + 1)
                } else {
                    cursors.clone()
                };
                self.resolve_chained(parameter, &branch)
            })
            .collect()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registered", &self.store.len())
            .finish()
    }
}

// ============================================================
// Prelude
// ============================================================

pub mod prelude {
    pub use super::Container;
    pub use crate::descriptor::{
        Arguments, Constructible, ConstructorSignature, ImplementationDescriptor, ServiceInstance,
    };
    pub use crate::error::{Result, SanduqError};
    pub use crate::key::ServiceKey;
    pub use crate::store::ComponentStore;
}

// ============================================================
// Tests
// ============================================================
