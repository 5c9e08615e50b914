//! Decorator chains with Sanduq.
//!
//! Three notifiers are registered under one service key. Each wrapper's
//! constructor asks for that same service, which the container satisfies
//! with the next registration down the chain.

use sanduq::{
    ComponentStore, Constructible, ConstructorSignature, Container, Result, ServiceKey,
};

// === The contract ===

trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

// Registrations under `dyn Notifier` box the trait object, so any link of
// the chain can hold its inner link without knowing the concrete type.

// === Terminal implementation ===

struct SmtpNotifier;

impl Notifier for SmtpNotifier {
    fn notify(&self, message: &str) {
        println!("smtp: {message}");
    }
}

impl Constructible for SmtpNotifier {
    fn signatures() -> Vec<ConstructorSignature> {
        vec![ConstructorSignature::new(vec![], |_| {
            Ok(Box::new(Box::new(SmtpNotifier) as Box<dyn Notifier>))
        })]
    }
}

// === Decorators ===

struct AuditNotifier {
    inner: Box<dyn Notifier>,
}

impl Notifier for AuditNotifier {
    fn notify(&self, message: &str) {
        println!("audit: {message}");
        self.inner.notify(message);
    }
}

impl Constructible for AuditNotifier {
    fn signatures() -> Vec<ConstructorSignature> {
        vec![ConstructorSignature::new(
            vec![ServiceKey::of::<dyn Notifier>()],
            |args| {
                let inner = args.next_as::<Box<dyn Notifier>>()?;
                Ok(Box::new(Box::new(AuditNotifier { inner }) as Box<dyn Notifier>))
            },
        )]
    }
}

struct RetryNotifier {
    inner: Box<dyn Notifier>,
    attempts: u8,
}

impl Notifier for RetryNotifier {
    fn notify(&self, message: &str) {
        for attempt in 1..=self.attempts {
            println!("retry: attempt {attempt}");
            self.inner.notify(message);
        }
    }
}

impl Constructible for RetryNotifier {
    fn signatures() -> Vec<ConstructorSignature> {
        vec![ConstructorSignature::new(
            vec![ServiceKey::of::<dyn Notifier>()],
            |args| {
                let inner = args.next_as::<Box<dyn Notifier>>()?;
                Ok(Box::new(
                    Box::new(RetryNotifier { inner, attempts: 2 }) as Box<dyn Notifier>
                ))
            },
        )]
    }
}

fn main() -> Result<()> {
    // Show the container's own registration/resolution logs.
    tracing_subscriber::fmt()
        .with_env_filter("sanduq_container=debug")
        .init();

    let mut store = ComponentStore::new();
    store.add::<dyn Notifier, AuditNotifier>();
    store.add::<dyn Notifier, RetryNotifier>();
    store.add::<dyn Notifier, SmtpNotifier>();

    let container = Container::new(store);

    // audit → retry → smtp, assembled purely from registration order
    let notifier = *container
        .resolve::<dyn Notifier>()?
        .downcast::<Box<dyn Notifier>>()
        .expect("dyn Notifier registrations box the trait object");

    notifier.notify("deploy finished");

    // One instance per registration, each resolved from its own chain
    // position.
    let all = container.resolve_all::<dyn Notifier>()?;
    println!("{} notifier(s) registered", all.len());

    Ok(())
}
