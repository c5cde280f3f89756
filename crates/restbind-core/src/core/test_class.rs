// crates/restbind-core/src/core/test_class.rs
// ============================================================================
// Module: Test Class Declarations
// Description: Explicit injection points and the bound-client bundle.
// Purpose: Replace runtime field enumeration with a declared registry.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A [`TestClass`] declares the client fields it wants, in order, together
//! with the modifiers those fields carry. Binding produces a
//! [`BoundClients`] bundle that the test stores itself; nothing is written
//! into global storage.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::fmt;

use crate::core::resource::Resource;
use crate::core::resource::ResourceType;

// ============================================================================
// SECTION: Field Modifiers
// ============================================================================

/// Field visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Reachable from outside the declaring type.
    Public,
    /// Restricted to the declaring type or crate.
    Restricted,
}

/// Storage scope of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    /// One slot shared by the whole test class.
    Class,
    /// One slot per test instance.
    Instance,
}

/// Modifiers declared on an injection field.
///
/// # Invariants
/// - A field is eligible only when public, class-level, and not constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldModifiers {
    /// Field visibility.
    pub visibility: Visibility,
    /// Field storage scope.
    pub scope: FieldScope,
    /// Whether the field is a constant.
    pub constant: bool,
}

impl FieldModifiers {
    /// Modifiers of an eligible field.
    #[must_use]
    pub const fn injectable() -> Self {
        Self {
            visibility: Visibility::Public,
            scope: FieldScope::Class,
            constant: false,
        }
    }

    /// Returns true when the field may receive an injected client.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self.visibility, Visibility::Public)
            && matches!(self.scope, FieldScope::Class)
            && !self.constant
    }
}

impl Default for FieldModifiers {
    fn default() -> Self {
        Self::injectable()
    }
}

// ============================================================================
// SECTION: Injection Points
// ============================================================================

/// Type-erased client produced for a field.
type BoxedClient = Box<dyn Any + Send + Sync>;

/// Wraps a proxy into the concrete resource type `T`.
fn wrap_resource<P, T: Resource<P>>(proxy: P) -> BoxedClient {
    Box::new(T::from_proxy(proxy))
}

/// A declared client field on a test class.
pub struct InjectionPoint<P> {
    /// Field name.
    field: String,
    /// Declared modifiers.
    modifiers: FieldModifiers,
    /// Client interface of the field.
    resource: ResourceType,
    /// Converts a runtime proxy into the field's client type.
    wrap: fn(P) -> BoxedClient,
}

impl<P> InjectionPoint<P> {
    /// Declares a field of client type `T`.
    #[must_use]
    pub fn new<T: Resource<P>>(field: impl Into<String>, modifiers: FieldModifiers) -> Self {
        Self {
            field: field.into(),
            modifiers,
            resource: T::resource_type(),
            wrap: wrap_resource::<P, T>,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the declared modifiers.
    #[must_use]
    pub const fn modifiers(&self) -> FieldModifiers {
        self.modifiers
    }

    /// Returns the client interface of the field.
    #[must_use]
    pub const fn resource(&self) -> &ResourceType {
        &self.resource
    }

    /// Wraps a proxy into the field's client type.
    pub(crate) fn wrap(&self, proxy: P) -> BoxedClient {
        (self.wrap)(proxy)
    }
}

impl<P> fmt::Debug for InjectionPoint<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionPoint")
            .field("field", &self.field)
            .field("modifiers", &self.modifiers)
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Test Class
// ============================================================================

/// Declared client fields of a test class, in declaration order.
pub struct TestClass<P> {
    /// Test class name used in diagnostics and errors.
    name: String,
    /// Declared injection points.
    points: Vec<InjectionPoint<P>>,
}

impl<P> TestClass<P> {
    /// Creates a test class without injection points.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    /// Declares an eligible client field of type `T`.
    #[must_use]
    pub fn inject<T: Resource<P>>(self, field: impl Into<String>) -> Self {
        self.inject_with::<T>(field, FieldModifiers::injectable())
    }

    /// Declares a client field of type `T` with explicit modifiers.
    #[must_use]
    pub fn inject_with<T: Resource<P>>(
        mut self,
        field: impl Into<String>,
        modifiers: FieldModifiers,
    ) -> Self {
        self.points.push(InjectionPoint::new::<T>(field, modifiers));
        self
    }

    /// Returns the test class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared injection points in order.
    #[must_use]
    pub fn injection_points(&self) -> &[InjectionPoint<P>] {
        &self.points
    }
}

impl<P> fmt::Debug for TestClass<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestClass")
            .field("name", &self.name)
            .field("points", &self.points)
            .finish()
    }
}

// ============================================================================
// SECTION: Bound Clients
// ============================================================================

/// A client bound to a declared field.
pub struct FieldBinding {
    /// Field name.
    field: String,
    /// Client interface of the field.
    resource: ResourceType,
    /// Bound client instance.
    client: BoxedClient,
}

impl FieldBinding {
    /// Returns the field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the client interface of the field.
    #[must_use]
    pub const fn resource(&self) -> &ResourceType {
        &self.resource
    }
}

impl fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("field", &self.field)
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

/// Clients bound for one test class.
///
/// # Invariants
/// - Bindings are kept in declaration order.
/// - Field names are unique within the bundle.
#[derive(Debug)]
pub struct BoundClients {
    /// Test class the clients were bound for.
    test_class: String,
    /// Bindings in declaration order.
    bindings: Vec<FieldBinding>,
}

impl BoundClients {
    /// Creates an empty bundle for a test class.
    #[must_use]
    pub fn new(test_class: impl Into<String>) -> Self {
        Self {
            test_class: test_class.into(),
            bindings: Vec::new(),
        }
    }

    /// Records a binding, replacing any earlier binding of the same field.
    pub(crate) fn insert<P>(&mut self, point: &InjectionPoint<P>, proxy: P) {
        let binding = FieldBinding {
            field: point.field().to_string(),
            resource: point.resource().clone(),
            client: point.wrap(proxy),
        };
        match self.bindings.iter_mut().find(|existing| existing.field == binding.field) {
            Some(existing) => *existing = binding,
            None => self.bindings.push(binding),
        }
    }

    /// Returns the test class name.
    #[must_use]
    pub fn test_class(&self) -> &str {
        &self.test_class
    }

    /// Returns the number of bound fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true when nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns the bindings in declaration order.
    #[must_use]
    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    /// Returns the bound field names in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(FieldBinding::field)
    }

    /// Returns the client bound to `field` when it has type `T`.
    #[must_use]
    pub fn get<T: 'static>(&self, field: &str) -> Option<&T> {
        self.bindings
            .iter()
            .find(|binding| binding.field == field)
            .and_then(|binding| binding.client.downcast_ref::<T>())
    }

    /// Removes and returns the client bound to `field` when it has type `T`.
    ///
    /// The binding is left in place when the type does not match.
    pub fn take<T: 'static>(&mut self, field: &str) -> Option<T> {
        let index = self.bindings.iter().position(|binding| binding.field == field)?;
        if !self.bindings[index].client.is::<T>() {
            return None;
        }
        let binding = self.bindings.remove(index);
        binding.client.downcast::<T>().ok().map(|client| *client)
    }
}
