// Sample events of the virtual airline domain, used to populate the catalog.

use std::fmt;

use eventstore::{
    Event, EventId, EventStoreError, IdentifiedEvent, NameRegistry, NamedEvent,
};

#[derive(Debug, Clone)]
pub struct TenantCreated {
    pub event: Event,
    pub tenant_id: String,
    pub name: String,
}

impl NamedEvent for TenantCreated {
    const NAME: &'static str = "tenant.created";
}

#[derive(Debug, Clone)]
pub struct UserRegistered {
    pub event: Event,
    pub user_id: String,
    pub tenant_id: Option<String>,
}

impl NamedEvent for UserRegistered {
    const NAME: &'static str = "user.registered";
}

#[derive(Debug, Clone)]
pub struct PirepSubmitted {
    pub event: Event,
    pub pirep_id: String,
    pub flight_number: String,
}

impl NamedEvent for PirepSubmitted {
    const NAME: &'static str = "pirep.submitted";
}

/// Correction of a submitted PIREP. Travels under the name of the original
/// submission.
#[derive(Debug, Clone)]
pub struct PirepAmended {
    pub event: Event,
    pub pirep_id: String,
    pub remarks: String,
}

/// Unnamed on purpose: resolves to the base name.
#[derive(Debug, Clone)]
pub struct AuditRecorded {
    pub event: Event,
    pub message: String,
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

identified!(TenantCreated, UserRegistered, PirepSubmitted, PirepAmended, AuditRecorded);

impl fmt::Display for TenantCreated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tenant {} '{}' created", self.tenant_id, self.name)
    }
}

impl fmt::Display for UserRegistered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tenant_id {
            Some(tenant_id) => write!(f, "user {} registered in tenant {}", self.user_id, tenant_id),
            None => write!(f, "user {} registered", self.user_id),
        }
    }
}

impl fmt::Display for PirepSubmitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pirep {} submitted for {}", self.pirep_id, self.flight_number)
    }
}

impl fmt::Display for PirepAmended {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pirep {} amended: {}", self.pirep_id, self.remarks)
    }
}

impl fmt::Display for AuditRecorded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "audit: {}", self.message)
    }
}

pub fn build_registry() -> Result<NameRegistry, EventStoreError> {
    NameRegistry::builder()
        .named_event::<TenantCreated>()?
        .named_event::<UserRegistered>()?
        .named_event::<PirepSubmitted>()?
        .extends::<PirepAmended, PirepSubmitted>()?
        .event::<AuditRecorded>()?
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventstore::EventName;

    #[test]
    fn test_sample_registry_names() {
        let registry = build_registry().unwrap();
        let name = |r: Option<&EventName>| r.map(|n| n.as_str().to_string());
        assert_eq!(name(registry.resolve::<TenantCreated>()).as_deref(), Some("tenant.created"));
        assert_eq!(name(registry.resolve::<PirepAmended>()).as_deref(), Some("pirep.submitted"));
        assert_eq!(name(registry.resolve::<AuditRecorded>()).as_deref(), Some("Event"));
    }

    #[test]
    fn test_events_describe_their_payload() {
        let created = TenantCreated {
            event: Event::new(EventId::new_v4()),
            tenant_id: "t-1".to_string(),
            name: "Albatross VA".to_string(),
        };
        assert_eq!(created.to_string(), "tenant t-1 'Albatross VA' created");

        let registered = UserRegistered {
            event: Event::new(EventId::new_v4()),
            user_id: "u-7".to_string(),
            tenant_id: None,
        };
        assert_eq!(registered.to_string(), "user u-7 registered");

        let audit = AuditRecorded {
            event: Event::new(EventId::new_v4()),
            message: "catalog dumped".to_string(),
        };
        assert_eq!(audit.to_string(), "audit: catalog dumped");
    }

    #[test]
    fn test_amendment_keeps_its_own_identity() {
        let registry = build_registry().unwrap();
        let submitted = PirepSubmitted {
            event: Event::new(EventId::new_v7()),
            pirep_id: "p-1".to_string(),
            flight_number: "ALB123".to_string(),
        };
        let amended = PirepAmended {
            event: Event::new(EventId::new_v7()),
            pirep_id: submitted.pirep_id.clone(),
            remarks: "fuel corrected".to_string(),
        };
        assert_ne!(submitted.id(), amended.id());
        assert_eq!(submitted.to_string(), "pirep p-1 submitted for ALB123");
        assert_eq!(amended.to_string(), "pirep p-1 amended: fuel corrected");
        assert_eq!(registry.resolve_event(&submitted), registry.resolve_event(&amended));
    }
}
