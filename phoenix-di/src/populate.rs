//! Filling the fields of an existing struct from the DI container

use crate::{Resolver, TypeKey, error::Error};
use std::fmt::{Debug, Formatter};

/// Assigns an already resolved value to a field of `S`
type Assign<S> = Box<dyn FnOnce(&mut S)>;

type ResolveFn<S> = Box<
    dyn Fn(&mut Resolver<'_>) -> Result<Assign<S>, Error>
>;

/// A trait for structs whose injectable fields can be filled in place.
///
/// Only fields listed in the manifest returned by [`Populate::fields`] take part,
/// everything else is left untouched. With the `macros` feature the manifest
/// is derived: every non-private field is listed in declaration order.
///
/// # Example
/// ```
/// use phoenix_di::{ContainerBuilder, Fields, Populate};
///
/// struct Service;
///
/// struct App {
///     pub service: Option<Service>,
///     retries: u8,
/// }
///
/// impl Populate for App {
///     fn fields() -> Fields<Self> {
///         Fields::new().field("service", |app: &mut Self, service: Option<Service>| app.service = service)
///     }
/// }
///
/// let mut container = ContainerBuilder::new();
/// container.register(|| Some(Service));
///
/// let mut app = App { service: None, retries: 3 };
/// container.build().populate(&mut app).unwrap();
///
/// assert!(app.service.is_some());
/// assert_eq!(app.retries, 3);
/// ```
pub trait Populate: Sized + 'static {
    /// Returns the injectable fields of `Self` in declaration order
    fn fields() -> Fields<Self>;
}

/// Ordered manifest of the injectable fields of `S`
pub struct Fields<S> {
    fields: Vec<Field<S>>
}

/// A single injectable field: its name, its type and how to set it
pub struct Field<S> {
    name: &'static str,
    key: TypeKey,
    resolve: ResolveFn<S>
}

impl<S> Debug for Fields<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.fields.iter()).finish()
    }
}

impl<S> Debug for Field<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<S: 'static> Default for Fields<S> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> Fields<S> {
    /// Creates an empty manifest
    #[inline]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a field of type `T` that is assigned through `set`
    pub fn field<T: 'static>(mut self, name: &'static str, set: fn(&mut S, T)) -> Self {
        let resolve: ResolveFn<S> = Box::new(move |r: &mut Resolver<'_>| -> Result<Assign<S>, Error> {
            let value = r.resolve::<T>()?;
            Ok(Box::new(move |target: &mut S| set(target, value)))
        });
        self.fields.push(Field { name, key: TypeKey::of::<T>(), resolve });
        self
    }

    /// Returns the number of injectable fields
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is injectable
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields in declaration order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Field<S>> {
        self.fields.iter()
    }
}

impl<S> Field<S> {
    /// Returns the field name
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field type
    #[inline]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    #[inline]
    pub(crate) fn resolve(&self, resolver: &mut Resolver<'_>) -> Result<Assign<S>, Error> {
        (self.resolve)(resolver)
    }
}
