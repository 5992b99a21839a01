//! Dependency Injection container and tools

use crate::{Inject, Populate, TypeKey, error::Error, key::BuildTypeKeyHasher};
use http::{Extensions, request::Parts};
use indexmap::{IndexMap, IndexSet};
use std::{
    any::Any,
    fmt::Debug,
    sync::Arc
};

pub use self::{
    constructor::Constructor,
    from_resolver::FromResolver,
    resolver::Resolver,
};

pub mod constructor;
pub mod from_resolver;
pub mod resolver;

type BuildFn = Arc<
    dyn Fn(&mut Resolver<'_>) -> Result<BoxedValue, Error>
    + Send
    + Sync
>;

type BoxedValue = Box<dyn Any>;

/// A registered builder: the produced type, its declared parameter types
/// and the type-erased constructor
pub(crate) struct Builder {
    dependencies: Vec<TypeKey>,
    build: BuildFn,
}

impl Debug for Builder {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Registry of builders in first-registration order
type BuilderMap = IndexMap<
    TypeKey,
    Builder,
    BuildTypeKeyHasher
>;

#[inline]
fn make_build_fn<T, F, Args>(constructor: F) -> BuildFn
where
    T: 'static,
    F: Constructor<Args, Output = T>,
    Args: FromResolver
{
    Arc::new(move |r: &mut Resolver<'_>| -> Result<BoxedValue, Error> {
        let args = Args::from_resolver(r)?;
        Ok(Box::new(constructor.call(args)) as BoxedValue)
    })
}

#[inline]
fn declared_dependencies<Args: FromResolver>() -> Vec<TypeKey> {
    let mut keys = Vec::new();
    Args::dependencies(&mut keys);
    keys
}

/// Represents a DI container builder
/// that registers one builder per produced type.
///
/// Registration may happen in any order, even before the builders of
/// the parameter types are registered.
#[derive(Debug)]
pub struct ContainerBuilder {
    /// Configurable map of builders
    builders: BuilderMap
}

impl Default for ContainerBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerBuilder {
    /// Creates a new DI container builder
    #[inline]
    pub fn new() -> Self {
        Self { builders: BuilderMap::default() }
    }

    /// Creates a new DI container builder with room for `capacity` builders
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { builders: BuilderMap::with_capacity_and_hasher(capacity, Default::default()) }
    }

    /// Build a DI container
    #[inline]
    pub fn build(self) -> Container {
        Container {
            builders: Arc::new(self.builders),
        }
    }

    /// Validates the declared dependency graph and builds a DI container.
    ///
    /// See [`ContainerBuilder::validate`].
    pub fn try_build(self) -> Result<Container, Error> {
        self.validate()?;
        Ok(self.build())
    }

    /// Registers a constructor under the type it returns.
    ///
    /// Every parameter of the constructor is resolved from the container.
    /// A previously registered builder for the same type is replaced.
    ///
    /// # Example
    /// ```
    /// use phoenix_di::ContainerBuilder;
    ///
    /// #[derive(Clone)]
    /// struct Config { url: String }
    /// struct Service { config: Config }
    ///
    /// let mut container = ContainerBuilder::new();
    /// container.register(|config: Config| Service { config });
    /// container.register(|| Config { url: "localhost".into() });
    ///
    /// let service = container.build().resolve::<Service>().unwrap();
    /// assert_eq!(service.config.url, "localhost");
    /// ```
    pub fn register<T, F, Args>(&mut self, constructor: F) -> &mut Self
    where
        T: 'static,
        F: Constructor<Args, Output = T>,
        Args: FromResolver
    {
        self.insert::<T>(declared_dependencies::<Args>(), make_build_fn(constructor))
    }

    /// Registers a fallible constructor under the type it returns on success.
    ///
    /// An error returned by the constructor is reported as [`Error::ConstructorFailed`].
    pub fn try_register<T, E, F, Args>(&mut self, constructor: F) -> &mut Self
    where
        T: 'static,
        E: std::error::Error + Send + Sync + 'static,
        F: Constructor<Args, Output = Result<T, E>>,
        Args: FromResolver
    {
        let build: BuildFn = Arc::new(move |r: &mut Resolver<'_>| -> Result<BoxedValue, Error> {
            let args = Args::from_resolver(r)?;
            constructor
                .call(args)
                .map(|t| Box::new(t) as BoxedValue)
                .map_err(|err| Error::constructor_failed(std::any::type_name::<T>(), err))
        });
        self.insert::<T>(declared_dependencies::<Args>(), build)
    }

    /// Registers a type that builds itself through [`Inject`]
    pub fn register_inject<T: Inject + 'static>(&mut self) -> &mut Self {
        let mut dependencies = Vec::new();
        T::dependencies(&mut dependencies);
        let build: BuildFn = Arc::new(|r: &mut Resolver<'_>| -> Result<BoxedValue, Error> {
            T::inject(r).map(|t| Box::new(t) as BoxedValue)
        });
        self.insert::<T>(dependencies, build)
    }

    /// Registers a value that is cloned on every resolution
    pub fn register_value<T>(&mut self, value: T) -> &mut Self
    where
        T: Clone + Send + Sync + 'static
    {
        self.register(move || value.clone())
    }

    /// Returns `true` if a builder for `T` is registered
    #[inline]
    pub fn contains<T: 'static>(&self) -> bool {
        self.builders.contains_key(&TypeKey::of::<T>())
    }

    /// Returns the number of registered builders
    #[inline]
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// Returns `true` if no builder is registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Returns the registered types in registration order
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.builders.keys().copied()
    }

    /// Walks the declared dependency graph of every registered builder
    /// without calling any of them.
    ///
    /// Reports the first parameter type without a builder as [`Error::NotRegistered`]
    /// and the first loop as [`Error::Cycle`].
    ///
    /// Only declared parameters are walked. Types resolved through a [`Container`]
    /// parameter or by an [`Inject`] impl that declares no dependencies are
    /// checked when they are resolved.
    pub fn validate(&self) -> Result<(), Error> {
        let mut done = IndexSet::<TypeKey, BuildTypeKeyHasher>::default();
        for key in self.builders.keys() {
            let mut path = IndexSet::<TypeKey, BuildTypeKeyHasher>::default();
            self.visit(*key, &mut path, &mut done)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        key: TypeKey,
        path: &mut IndexSet<TypeKey, BuildTypeKeyHasher>,
        done: &mut IndexSet<TypeKey, BuildTypeKeyHasher>
    ) -> Result<(), Error> {
        if done.contains(&key) {
            return Ok(());
        }
        if let Some(start) = path.get_index_of(&key) {
            let mut cycle = path
                .iter()
                .skip(start)
                .map(TypeKey::name)
                .collect::<Vec<_>>();
            cycle.push(key.name());
            return Err(Error::Cycle(cycle));
        }
        if key.id() == std::any::TypeId::of::<Container>() {
            return Ok(());
        }
        let builder = self.builders
            .get(&key)
            .ok_or(Error::NotRegistered(key.name()))?;

        path.insert(key);
        for dependency in &builder.dependencies {
            self.visit(*dependency, path, done)?;
        }
        path.pop();
        done.insert(key);
        Ok(())
    }

    fn insert<T: 'static>(&mut self, dependencies: Vec<TypeKey>, build: BuildFn) -> &mut Self {
        let key = TypeKey::of::<T>();
        if key.id() == std::any::TypeId::of::<Container>() {
            // resolving `Container` always yields the container itself
            #[cfg(feature = "tracing")]
            tracing::warn!("builder ignored for type: {key}");
            return self;
        }

        let _replaced = self.builders.insert(key, Builder { dependencies, build });

        #[cfg(feature = "tracing")]
        if _replaced.is_some() {
            tracing::debug!("builder replaced for type: {key}");
        } else {
            tracing::debug!("builder registered for type: {key}");
        }

        self
    }
}

/// Represents a DI container, that is able to resolve generic dependencies.
///
/// The registry is read-only and shared, cloning the container is cheap.
#[derive(Debug, Clone)]
pub struct Container {
    /// Read-only map of builders
    builders: Arc<BuilderMap>
}

impl Container {
    /// Creates a resolver over the active resolution path of this thread
    #[inline]
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self)
    }

    /// Builds a value of `T` with all its transitive dependencies
    #[inline]
    pub fn resolve<T: 'static>(&self) -> Result<T, Error> {
        self.resolver().resolve::<T>()
    }

    /// Builds a value of `T` or stops the start-up.
    ///
    /// # Panics
    /// If `T` or any of its dependencies has no builder, if the dependency graph
    /// contains a cycle or if a constructor fails.
    pub fn resolve_or_abort<T: 'static>(&self) -> T {
        self.resolve::<T>().unwrap_or_else(|err| abort(err))
    }

    /// Resolves the parameters of an unregistered `constructor` and calls it once
    #[inline]
    pub fn invoke<F, Args>(&self, constructor: &F) -> Result<F::Output, Error>
    where
        F: Constructor<Args>,
        Args: FromResolver
    {
        self.resolver().invoke(constructor)
    }

    /// Resolves and assigns every injectable field of `target` in place.
    ///
    /// Fields outside of the [`Populate`] manifest are left untouched.
    /// On error the target is not modified.
    #[inline]
    pub fn populate<S: Populate>(&self, target: &mut S) -> Result<(), Error> {
        self.resolver().populate(target)
    }

    /// Populates `target` or stops the start-up.
    ///
    /// # Panics
    /// If any field can not be resolved.
    pub fn populate_or_abort<S: Populate>(&self, target: &mut S) {
        if let Err(err) = self.populate(target) {
            abort(err)
        }
    }

    /// Returns `true` if a builder for `T` is registered
    #[inline]
    pub fn contains<T: 'static>(&self) -> bool {
        self.builders.contains_key(&TypeKey::of::<T>())
    }

    /// Returns the number of registered builders
    #[inline]
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// Returns `true` if no builder is registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Returns the registered types in registration order.
    ///
    /// The iterator is lazy, call it again to start over.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.builders.keys().copied()
    }

    /// Returns the declared parameter types of the builder for `key`
    #[inline]
    pub fn dependencies_of(&self, key: &TypeKey) -> Option<&[TypeKey]> {
        self.builders
            .get(key)
            .map(|builder| builder.dependencies.as_slice())
    }

    /// Logs every registered type
    #[cfg(feature = "tracing")]
    pub fn log_registered(&self) {
        for key in self.keys() {
            tracing::info!("builder registered for type: {key}");
        }
    }

    #[inline]
    fn builder(&self, key: &TypeKey) -> Option<&Builder> {
        self.builders.get(key)
    }

    /// Identifies the shared registry, equal for every clone of this container
    #[inline]
    fn registry_id(&self) -> usize {
        Arc::as_ptr(&self.builders) as usize
    }
}

#[cold]
fn abort(err: Error) -> ! {
    #[cfg(feature = "tracing")]
    tracing::error!("{err}");
    panic!("{err}")
}

impl<'a> TryFrom<&'a Extensions> for &'a Container {
    type Error = Error;

    #[inline]
    fn try_from(extensions: &'a Extensions) -> Result<Self, Self::Error> {
        extensions.get::<Container>()
            .ok_or(Error::ContainerMissing)
    }
}

impl TryFrom<&Extensions> for Container {
    type Error = Error;

    #[inline]
    fn try_from(extensions: &Extensions) -> Result<Self, Self::Error> {
        let res: Result<&Container, Error> = extensions.try_into();
        res.cloned()
    }
}

impl TryFrom<&Parts> for Container {
    type Error = Error;

    #[inline]
    fn try_from(parts: &Parts) -> Result<Self, Self::Error> {
        Container::try_from(&parts.extensions)
    }
}
