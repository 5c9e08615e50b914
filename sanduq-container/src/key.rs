//! Service identity keys.
//!
//! [`ServiceKey`] is the opaque token under which implementations are
//! registered and later requested. It identifies an abstract contract,
//! usually a trait object type such as `dyn Mailer`, never a particular
//! implementation of it.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use sanduq_support::rendering::shorten_type_name;

/// Identity of an abstract service contract.
///
/// A key is a [`TypeId`] plus the captured type name. Any `'static` type
/// works, sized or not, so trait objects serve directly as registration
/// markers:
///
/// ```
/// use sanduq_container::key::ServiceKey;
///
/// trait Mailer {}
///
/// let key = ServiceKey::of::<dyn Mailer>();
/// assert!(key.type_name().contains("Mailer"));
/// ```
///
/// Keys compare and hash by [`TypeId`] alone; the type name rides along
/// for error messages. A name discriminator passed to a named lookup is
/// deliberately not part of the key — it never affects which chain a
/// lookup hits, only how a failure reads.
#[derive(Clone)]
pub struct ServiceKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl ServiceKey {
    /// Creates the key for the contract type `S`.
    #[inline]
    pub fn of<S: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            type_name: type_name::<S>(),
        }
    }

    /// Returns the [`TypeId`] of the contract.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the fully qualified type name of the contract.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name with module paths stripped, for compact rendering.
    pub fn short_name(&self) -> String {
        shorten_type_name(self.type_name)
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceKey({})", self.type_name)
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}
