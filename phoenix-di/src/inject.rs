//! Utilities to inject and resolve dependencies

use crate::{Resolver, TypeKey};
use crate::error::Error;

/// A trait that adds the ability to inject dependencies when a type is resolved from the DI container
///
/// If there is no need to inject other dependencies, the `struct` must implement the `Default` trait
///
/// # Example
/// ```
/// use phoenix_di::ContainerBuilder;
///
/// #[derive(Default)]
/// struct Clock;
///
/// let mut container = ContainerBuilder::new();
/// container.register_inject::<Clock>();
///
/// assert!(container.build().resolve::<Clock>().is_ok());
/// ```
///
/// If it's required to construct a `struct` from other dependencies, the `Inject` can be implemented manually
///
/// # Example
/// ```
/// use phoenix_di::{ContainerBuilder, Error, Inject, Resolver, TypeKey};
///
/// #[derive(Default)]
/// struct Clock;
///
/// struct Scheduler {
///     clock: Clock
/// }
///
/// impl Inject for Scheduler {
///     fn dependencies(keys: &mut Vec<TypeKey>) {
///         keys.push(TypeKey::of::<Clock>());
///     }
///
///     fn inject(resolver: &mut Resolver<'_>) -> Result<Self, Error> {
///         let clock = resolver.resolve::<Clock>()?;
///         Ok(Self { clock })
///     }
/// }
///
/// let mut container = ContainerBuilder::new();
/// container.register_inject::<Clock>();
/// container.register_inject::<Scheduler>();
///
/// let container = container.try_build().unwrap();
/// assert!(container.resolve::<Scheduler>().is_ok());
/// ```
pub trait Inject: Sized + Send + Sync {
    /// Appends the types `inject` resolves, used by [`ContainerBuilder::validate`](crate::ContainerBuilder::validate)
    #[inline]
    fn dependencies(_keys: &mut Vec<TypeKey>) {}

    /// Builds `Self`, resolving dependencies through `resolver`
    fn inject(resolver: &mut Resolver<'_>) -> Result<Self, Error>;
}

impl<T: Default + Send + Sync> Inject for T {
    #[inline]
    fn inject(_: &mut Resolver<'_>) -> Result<Self, Error> {
        Ok(Self::default())
    }
}
