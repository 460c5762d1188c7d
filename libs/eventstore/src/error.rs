/// Errors raised while constructing events or building a name registry.
///
/// Resolving a name never fails: a type without a declared name anywhere in
/// its ancestry resolves to `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventStoreError {
    /// The nil UUID was supplied where an event identifier is required.
    #[error("event identifier must not be the nil UUID")]
    NilEventId,
    /// An event name was empty or consisted only of whitespace.
    #[error("event name must not be empty")]
    EmptyName,
    /// A type was given two different names.
    #[error("type {type_name} is already named '{existing}', cannot rename it to '{requested}'")]
    ConflictingName {
        type_name: &'static str,
        existing: String,
        requested: String,
    },
    /// Two different types declared the same name.
    #[error("event name '{name}' is declared by both {first} and {second}")]
    DuplicateName {
        name: String,
        first: &'static str,
        second: &'static str,
    },
    /// A type was given two different parents.
    #[error("type {type_name} already extends {existing}, cannot extend {requested}")]
    ConflictingParent {
        type_name: &'static str,
        existing: &'static str,
        requested: &'static str,
    },
    /// Parent links loop back onto themselves.
    #[error("type hierarchy of {type_name} contains a cycle")]
    CyclicHierarchy { type_name: &'static str },
    /// The process-wide registry was installed more than once.
    #[error("a global name registry is already installed")]
    AlreadyInstalled,
}
