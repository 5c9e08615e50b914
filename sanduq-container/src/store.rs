//! Component store — the registration side of Sanduq.
//!
//! Maps service keys to the ordered implementations registered under
//! them. Registration only ever appends: adding the same pair twice
//! creates two chain entries, and the entry order is exactly what chain
//! resolution walks. Earlier entries are never reordered or replaced.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::descriptor::{Constructible, ImplementationDescriptor};
use crate::key::ServiceKey;

/// Append-only registry of implementations per service.
///
/// Populated during the registration phase, then handed to a
/// [`Container`](crate::container::Container), which treats it as
/// read-only for the rest of its life.
///
/// ```
/// use sanduq_container::descriptor::{Constructible, ConstructorSignature};
/// use sanduq_container::key::ServiceKey;
/// use sanduq_container::store::ComponentStore;
///
/// trait Cache: Send + Sync {}
///
/// struct MemoryCache;
///
/// impl Constructible for MemoryCache {
///     fn signatures() -> Vec<ConstructorSignature> {
///         vec![ConstructorSignature::new(vec![], |_| Ok(Box::new(MemoryCache)))]
///     }
/// }
///
/// let mut store = ComponentStore::new();
/// store.add::<dyn Cache, MemoryCache>();
/// assert!(store.try_get(&ServiceKey::of::<dyn Cache>()).is_some());
/// ```
#[derive(Default)]
pub struct ComponentStore {
    entries: HashMap<ServiceKey, Vec<ImplementationDescriptor>>,
}

impl ComponentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `I` as an implementation of the service `S`.
    ///
    /// `S` is only an identity token here; whether `I` actually honors
    /// the contract `S` stands for is the registrant's business.
    pub fn add<S: ?Sized + 'static, I: Constructible>(&mut self) {
        self.append(ServiceKey::of::<S>(), ImplementationDescriptor::of::<I>());
    }

    /// Appends a descriptor to the chain for `key`, creating the entry if
    /// absent. Registration cannot fail; duplicates are legal and become
    /// separate chain entries.
    pub fn append(&mut self, key: ServiceKey, descriptor: ImplementationDescriptor) {
        debug!(service = %key, implementation = %descriptor.key(), "registered implementation");
        self.entries.entry(key).or_default().push(descriptor);
    }

    /// All implementations registered for `key`, in registration order.
    /// Pure lookup, no side effects.
    pub fn try_get(&self, key: &ServiceKey) -> Option<&[ImplementationDescriptor]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of distinct services with at least one registration.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentStore")
            .field("services", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ConstructorSignature;

    trait Queue: Send + Sync {}

    struct RingQueue;

    impl Constructible for RingQueue {
        fn signatures() -> Vec<ConstructorSignature> {
            vec![ConstructorSignature::new(vec![], |_| Ok(Box::new(RingQueue)))]
        }
    }

    struct SpillQueue;

    impl Constructible for SpillQueue {
        fn signatures() -> Vec<ConstructorSignature> {
            vec![ConstructorSignature::new(vec![], |_| Ok(Box::new(SpillQueue)))]
        }
    }

    #[test]
    fn add_and_try_get() {
        let mut store = ComponentStore::new();
        store.add::<dyn Queue, RingQueue>();

        let chain = store.try_get(&ServiceKey::of::<dyn Queue>()).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(*chain[0].key(), ServiceKey::of::<RingQueue>());
    }

    #[test]
    fn absent_key_yields_none() {
        let store = ComponentStore::new();
        assert!(store.try_get(&ServiceKey::of::<dyn Queue>()).is_none());
    }

    #[test]
    fn registrations_append_in_order() {
        let mut store = ComponentStore::new();
        store.add::<dyn Queue, RingQueue>();
        store.add::<dyn Queue, SpillQueue>();

        let chain = store.try_get(&ServiceKey::of::<dyn Queue>()).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(*chain[0].key(), ServiceKey::of::<RingQueue>());
        assert_eq!(*chain[1].key(), ServiceKey::of::<SpillQueue>());
    }

    #[test]
    fn duplicate_pairs_become_two_entries() {
        let mut store = ComponentStore::new();
        store.add::<dyn Queue, RingQueue>();
        store.add::<dyn Queue, RingQueue>();

        let chain = store.try_get(&ServiceKey::of::<dyn Queue>()).unwrap();
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn len_counts_services_not_entries() {
        let mut store = ComponentStore::new();
        assert!(store.is_empty());

        store.add::<dyn Queue, RingQueue>();
        store.add::<dyn Queue, SpillQueue>();
        store.add::<RingQueue, RingQueue>();

        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }
}
