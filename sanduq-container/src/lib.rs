//! Core resolution engine for Sanduq.

pub mod container;
pub mod descriptor;
pub mod error;
pub mod key;
pub mod store;

pub use container::{Container, prelude};
pub use descriptor::{
    Arguments, ConstructFn, Constructible, ConstructorSignature, ImplementationDescriptor,
    ServiceInstance,
};
pub use error::{Result, SanduqError};
pub use key::ServiceKey;
pub use store::ComponentStore;
