//! Method identities and interface descriptors.

use std::fmt;

/// Stable identity of a trait method.
///
/// Two calls of the same method on different wrapped instances of a trait
/// produce equal identities, so their durations aggregate together.
/// Ordering is by trait path, then method name, then signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId {
    interface: &'static str,
    name: &'static str,
    signature: &'static str,
}

impl MethodId {
    /// Create a method identity.
    #[must_use]
    pub const fn new(interface: &'static str, name: &'static str, signature: &'static str) -> Self {
        Self {
            interface,
            name,
            signature,
        }
    }

    /// Qualified path of the declaring trait.
    #[must_use]
    pub const fn interface(&self) -> &'static str {
        self.interface
    }

    /// Method name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Parameter and return types as written in the trait.
    #[must_use]
    pub const fn signature(&self) -> &'static str {
        self.signature
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.interface, self.name)
    }
}

/// A method declared on a profiled interface.
#[derive(Debug, Clone, Copy)]
pub struct MethodDescriptor {
    id: MethodId,
    profiled: bool,
}

impl MethodDescriptor {
    /// Describe a method, marking whether calls to it are timed.
    #[must_use]
    pub const fn new(id: MethodId, profiled: bool) -> Self {
        Self { id, profiled }
    }

    /// Identity used as the aggregation key.
    #[must_use]
    pub const fn id(&self) -> MethodId {
        self.id
    }

    /// Whether the method carries the `#[profiled]` marker.
    #[must_use]
    pub const fn is_profiled(&self) -> bool {
        self.profiled
    }
}

/// Static description of a trait usable with [`crate::Profiler::wrap`].
///
/// Methods are listed in declaration order; a method's position is its slot
/// index in [`crate::Interceptor::invoke`].
#[derive(Debug)]
pub struct InterfaceDescriptor {
    path: &'static str,
    methods: &'static [MethodDescriptor],
}

impl InterfaceDescriptor {
    /// Describe a trait by its qualified path and methods.
    #[must_use]
    pub const fn new(path: &'static str, methods: &'static [MethodDescriptor]) -> Self {
        Self { path, methods }
    }

    /// Qualified path of the trait.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// All declared methods, profiled or not.
    #[must_use]
    pub const fn methods(&self) -> &'static [MethodDescriptor] {
        self.methods
    }

    /// Methods carrying the `#[profiled]` marker.
    pub fn profiled_methods(&self) -> impl Iterator<Item = &'static MethodDescriptor> {
        self.methods.iter().filter(|method| method.is_profiled())
    }

    /// Whether at least one method is timed.
    #[must_use]
    pub fn has_profiled_methods(&self) -> bool {
        self.profiled_methods().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FETCH: MethodId = MethodId::new("crawler::Fetcher", "fetch", "(&str) -> Page");
    const NAME: MethodId = MethodId::new("crawler::Fetcher", "name", "() -> String");

    static METHODS: [MethodDescriptor; 2] = [
        MethodDescriptor::new(FETCH, true),
        MethodDescriptor::new(NAME, false),
    ];

    #[test]
    fn display_joins_interface_and_method() {
        assert_eq!(FETCH.to_string(), "crawler::Fetcher#fetch");
    }

    #[test]
    fn identities_order_by_interface_then_name() {
        let parse = MethodId::new("crawler::Fetcher", "parse", "");
        let other = MethodId::new("crawler::Archive", "store", "");

        let mut ids = vec![parse, FETCH, other];
        ids.sort();
        assert_eq!(ids, vec![other, FETCH, parse]);
    }

    #[test]
    fn descriptor_lists_profiled_methods() {
        let descriptor = InterfaceDescriptor::new("crawler::Fetcher", &METHODS);

        let profiled: Vec<_> = descriptor.profiled_methods().map(MethodDescriptor::id).collect();
        assert_eq!(profiled, vec![FETCH]);
        assert!(descriptor.has_profiled_methods());
    }

    #[test]
    fn descriptor_without_markers_has_nothing_to_profile() {
        static PLAIN: [MethodDescriptor; 1] = [MethodDescriptor::new(NAME, false)];
        let descriptor = InterfaceDescriptor::new("crawler::Plain", &PLAIN);

        assert!(!descriptor.has_profiled_methods());
        assert_eq!(descriptor.methods().len(), 1);
    }
}
