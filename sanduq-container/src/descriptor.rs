//! Implementation descriptors and constructor metadata.
//!
//! A registered implementation is described by its own [`ServiceKey`] and
//! the ordered [`ConstructorSignature`]s it can be built with. Constructor
//! metadata is supplied at registration time through the [`Constructible`]
//! trait rather than discovered by runtime inspection, so the resolver
//! knows every parameter a candidate needs before committing to it.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SanduqError};
use crate::key::ServiceKey;

/// A constructed service, type-erased.
///
/// The resolver never looks inside the box. What the implementations of a
/// given service store in it — the concrete struct itself, or a boxed
/// trait object such as `Box<dyn Mailer>` — is a convention between those
/// implementations and the code that resolves them. Chain-style
/// implementations usually keep the erased box for their inner link and
/// let tests or callers downcast it.
pub type ServiceInstance = Box<dyn Any + Send + Sync>;

/// Construction closure: consumes resolved parameters, produces the instance.
///
/// `Arc` because descriptors are cloned while signatures stay shared.
pub type ConstructFn = Arc<dyn Fn(&mut Arguments) -> Result<ServiceInstance> + Send + Sync>;

/// Compile-time constructor metadata for a concrete implementation.
///
/// Implementing this trait is what makes a type registrable: it hands the
/// resolver the ordered list of ways the type can be built, each with the
/// service keys its parameters require.
///
/// ```
/// use sanduq_container::descriptor::{Constructible, ConstructorSignature};
/// use sanduq_container::key::ServiceKey;
///
/// trait Clock: Send + Sync {}
///
/// struct Scheduler {
///     clock: sanduq_container::descriptor::ServiceInstance,
/// }
///
/// impl Constructible for Scheduler {
///     fn signatures() -> Vec<ConstructorSignature> {
///         vec![ConstructorSignature::new(
///             vec![ServiceKey::of::<dyn Clock>()],
///             |args| Ok(Box::new(Scheduler { clock: args.next_service()? })),
///         )]
///     }
/// }
/// ```
pub trait Constructible: 'static {
    /// Constructor signatures in declaration order. The resolver commits
    /// to the first signature whose parameters it can satisfy.
    fn signatures() -> Vec<ConstructorSignature>;
}

/// One way to build an implementation: the parameter keys it needs, in
/// order, and the closure that assembles the instance from them.
#[derive(Clone)]
pub struct ConstructorSignature {
    parameters: Vec<ServiceKey>,
    construct: ConstructFn,
}

impl ConstructorSignature {
    pub fn new(
        parameters: Vec<ServiceKey>,
        construct: impl Fn(&mut Arguments) -> Result<ServiceInstance> + Send + Sync + 'static,
    ) -> Self {
        Self {
            parameters,
            construct: Arc::new(construct),
        }
    }

    /// Parameter keys, in the order the construction closure consumes them.
    pub fn parameters(&self) -> &[ServiceKey] {
        &self.parameters
    }

    pub(crate) fn instantiate(&self, arguments: &mut Arguments) -> Result<ServiceInstance> {
        (self.construct)(arguments)
    }
}

impl fmt::Debug for ConstructorSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorSignature")
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// A concrete constructible type registered to satisfy a service.
///
/// Immutable once captured; registering the same type twice captures two
/// independent descriptors.
#[derive(Clone)]
pub struct ImplementationDescriptor {
    key: ServiceKey,
    constructors: Vec<ConstructorSignature>,
}

impl ImplementationDescriptor {
    /// Captures the descriptor for `I` from its [`Constructible`] metadata.
    pub fn of<I: Constructible>() -> Self {
        Self {
            key: ServiceKey::of::<I>(),
            constructors: I::signatures(),
        }
    }

    /// Builds a descriptor from explicit parts, for registrations that do
    /// not go through [`Constructible`].
    pub fn new(key: ServiceKey, constructors: Vec<ConstructorSignature>) -> Self {
        Self { key, constructors }
    }

    /// Key of the concrete implementation type itself.
    pub fn key(&self) -> &ServiceKey {
        &self.key
    }

    /// Constructor signatures in declaration order.
    pub fn constructors(&self) -> &[ConstructorSignature] {
        &self.constructors
    }
}

impl fmt::Debug for ImplementationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplementationDescriptor")
            .field("key", &self.key)
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

/// Resolved constructor parameters, consumed positionally.
///
/// Handed to the construction closure once every parameter of the
/// committed signature has resolved. Consuming past the end, or
/// downcasting to a payload type the parameter does not hold, fails with
/// [`SanduqError::Construction`].
pub struct Arguments {
    implementation: ServiceKey,
    values: VecDeque<ServiceInstance>,
}

impl Arguments {
    pub(crate) fn new(implementation: ServiceKey, values: Vec<ServiceInstance>) -> Self {
        Self {
            implementation,
            values: values.into(),
        }
    }

    /// Next parameter, still type-erased. Chain links keep the erased box.
    pub fn next_service(&mut self) -> Result<ServiceInstance> {
        self.values.pop_front().ok_or_else(|| SanduqError::Construction {
            key: self.implementation.clone(),
            source: "constructor consumed more parameters than its signature declares".into(),
        })
    }

    /// Next parameter, downcast to the payload type the registrant expects.
    pub fn next_as<T: Any>(&mut self) -> Result<T> {
        self.next_service()?
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| SanduqError::Construction {
                key: self.implementation.clone(),
                source: format!(
                    "parameter payload is not a {}",
                    std::any::type_name::<T>()
                )
                .into(),
            })
    }

    /// Parameters not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}
