use eventstore::{
    Event, EventId, EventName, EventStoreError, IdentifiedEvent, NameRegistry, NamedEvent,
    TypeKey,
};

// Payment
//   CardPayment          (named "payment.card")
//     RecurringCard      (no name)
//       TrialRecurring   (no name)
//   BankTransfer         (no name)
struct Payment {
    event: Event,
}
struct CardPayment {
    event: Event,
}
struct RecurringCard {
    event: Event,
}
struct TrialRecurring {
    event: Event,
}
struct BankTransfer {
    event: Event,
}

macro_rules! identified {
    ($($ty:ident),*) => {
        $(impl IdentifiedEvent for $ty {
            fn id(&self) -> EventId {
                self.event.id()
            }
        })*
    };
}

identified!(Payment, CardPayment, RecurringCard, TrialRecurring, BankTransfer);

impl NamedEvent for Payment {
    const NAME: &'static str = "payment";
}

impl NamedEvent for CardPayment {
    const NAME: &'static str = "payment.card";
}

fn registry() -> Result<NameRegistry, EventStoreError> {
    NameRegistry::builder()
        .named_event::<Payment>()?
        .extends::<CardPayment, Payment>()?
        .named::<CardPayment>()?
        .extends::<RecurringCard, CardPayment>()?
        .extends::<TrialRecurring, RecurringCard>()?
        .extends::<BankTransfer, Payment>()?
        .build()
}

fn name_of<T: 'static>(registry: &NameRegistry) -> Option<&str> {
    registry.resolve::<T>().map(EventName::as_str)
}

#[test]
fn test_deep_chain_resolves_to_nearest_declaration() {
    let registry = registry().unwrap();
    assert_eq!(name_of::<TrialRecurring>(&registry), Some("payment.card"));
    assert_eq!(name_of::<RecurringCard>(&registry), Some("payment.card"));
    assert_eq!(name_of::<BankTransfer>(&registry), Some("payment"));
    assert_eq!(name_of::<Payment>(&registry), Some("payment"));
    assert_eq!(name_of::<Event>(&registry), Some("Event"));
}

#[test]
fn test_ancestors_are_listed_most_specific_first() {
    let registry = registry().unwrap();
    assert_eq!(
        registry.ancestors(TypeKey::of::<TrialRecurring>()),
        vec![
            TypeKey::of::<RecurringCard>(),
            TypeKey::of::<CardPayment>(),
            TypeKey::of::<Payment>(),
            TypeKey::of::<Event>(),
        ]
    );
    assert!(registry.ancestors(TypeKey::of::<Event>()).is_empty());
}

#[test]
fn test_reverse_lookup_returns_declaring_type_only() {
    let registry = registry().unwrap();
    assert_eq!(registry.type_for("payment.card"), Some(TypeKey::of::<CardPayment>()));
    assert_eq!(registry.type_for("payment"), Some(TypeKey::of::<Payment>()));
    assert_eq!(registry.type_for("payment.recurring"), None);
}

#[test]
fn test_unregistered_type_has_no_name() {
    struct Stray;
    let registry = registry().unwrap();
    assert!(!registry.contains::<Stray>());
    assert_eq!(name_of::<Stray>(&registry), None);
}

#[test]
fn test_resolve_from_instance() {
    let registry = registry().unwrap();
    let event = RecurringCard {
        event: Event::new(EventId::new_v4()),
    };
    let resolution = registry.resolve_origin(TypeKey::of::<RecurringCard>()).unwrap();
    assert_eq!(registry.resolve_event(&event), Some(resolution.name));
    assert_eq!(resolution.declared_by, TypeKey::of::<CardPayment>());
}

#[test]
fn test_catalog_serializes_to_json() {
    let registry = registry().unwrap();
    let catalog = serde_json::to_value(registry.catalog()).unwrap();
    let rows = catalog.as_array().unwrap();
    assert_eq!(rows.len(), 6);

    let trial = rows
        .iter()
        .find(|row| row["type_name"].as_str().unwrap().ends_with("TrialRecurring"))
        .unwrap();
    assert_eq!(trial["name"], "payment.card");
    assert_eq!(trial["inherited"], true);
}

#[test]
fn test_registry_is_shareable_across_threads() {
    let registry = std::sync::Arc::new(registry().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                registry
                    .resolve::<TrialRecurring>()
                    .map(|name| name.to_string())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("payment.card"));
    }
}
