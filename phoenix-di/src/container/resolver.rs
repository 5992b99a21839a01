//! Recursive construction of a dependency graph

use indexmap::IndexSet;
use std::{any::TypeId, cell::RefCell};
use crate::{Populate, TypeKey, error::Error};
use super::{BoxedValue, Container, Constructor, FromResolver};

/// Active resolution path, ordered from the root to the type under construction.
///
/// Entries are keyed by the registry they were resolved from as well.
type ResolutionPath = IndexSet<(usize, TypeKey), crate::key::BuildTypeKeyHasher>;

thread_local! {
    /// Shared by every resolver on the thread, so that a constructor resolving
    /// through its own [`Container`] handle continues the current path.
    static ACTIVE_PATH: RefCell<ResolutionPath> = RefCell::new(ResolutionPath::default());
}

/// Removes the innermost entry of the active path when dropped,
/// including when a constructor panics.
struct PathGuard;

impl Drop for PathGuard {
    #[inline]
    fn drop(&mut self) {
        ACTIVE_PATH.with_borrow_mut(|path| {
            path.pop();
        });
    }
}

/// Resolves types out of a [`Container`].
///
/// Tracks the types currently under construction, so that a type requested
/// again before its own builder returns is reported as [`Error::Cycle`]
/// instead of recursing forever. The path is shared with every other
/// resolution of the same container running on this thread, which covers
/// constructors that take a [`Container`] and resolve from it.
/// Nothing is cached: every request builds its whole subtree again.
#[derive(Debug)]
pub struct Resolver<'a> {
    container: &'a Container
}

impl<'a> Resolver<'a> {
    #[inline]
    pub(super) fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Returns the container this resolver reads builders from
    #[inline]
    pub fn container(&self) -> &'a Container {
        self.container
    }

    /// Returns the types of this container currently under construction, root first
    pub fn path(&self) -> Vec<TypeKey> {
        let registry = self.container.registry_id();
        ACTIVE_PATH.with_borrow(|path| path
            .iter()
            .filter(|(id, _)| *id == registry)
            .map(|(_, key)| *key)
            .collect())
    }

    /// Builds a value of `T` and, before that, every dependency of its builder
    pub fn resolve<T: 'static>(&mut self) -> Result<T, Error> {
        let key = TypeKey::of::<T>();
        if key.id() == TypeId::of::<Container>() {
            // `Container` itself is always resolvable
            return Self::downcast(key, Box::new(self.container.clone()));
        }

        let container = self.container;
        let Some(builder) = container.builder(&key) else {
            return Err(Error::NotRegistered(key.name()));
        };

        let _guard = self.enter(key)?;
        let value = (builder.build)(self);

        #[cfg(feature = "tracing")]
        if let Err(err) = &value {
            tracing::trace!("failed to resolve {key}: {err}");
        }

        Self::downcast(key, value?)
    }

    /// Resolves the parameters of `constructor` and calls it once.
    ///
    /// The constructor does not need to be registered.
    pub fn invoke<F, Args>(&mut self, constructor: &F) -> Result<F::Output, Error>
    where
        F: Constructor<Args>,
        Args: FromResolver
    {
        let args = Args::from_resolver(self)?;
        Ok(constructor.call(args))
    }

    /// Resolves every field listed by [`Populate::fields`] and assigns them.
    ///
    /// Either every field is assigned or, on error, none of them.
    pub fn populate<S: Populate>(&mut self, target: &mut S) -> Result<(), Error> {
        let fields = S::fields();
        let mut assigns = Vec::with_capacity(fields.len());
        for field in fields.iter() {
            #[cfg(feature = "tracing")]
            tracing::trace!("populating field `{}` of {}", field.name(), std::any::type_name::<S>());
            assigns.push(field.resolve(self)?);
        }
        for assign in assigns {
            assign(target);
        }
        Ok(())
    }

    #[inline]
    fn downcast<T: 'static>(key: TypeKey, value: BoxedValue) -> Result<T, Error> {
        value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::ResolveFailed(key.name()))
    }

    /// Pushes `key` onto the active path, or reports the loop it closes
    fn enter(&self, key: TypeKey) -> Result<PathGuard, Error> {
        let entry = (self.container.registry_id(), key);
        ACTIVE_PATH.with_borrow_mut(|path| {
            let Some(start) = path.get_index_of(&entry) else {
                #[cfg(feature = "tracing")]
                tracing::trace!(depth = path.len(), "resolving {key}");
                path.insert(entry);
                return Ok(PathGuard);
            };

            let mut cycle = path
                .iter()
                .skip(start)
                .filter(|(id, _)| *id == entry.0)
                .map(|(_, key)| key.name())
                .collect::<Vec<_>>();
            cycle.push(key.name());

            #[cfg(feature = "tracing")]
            tracing::warn!("dependency cycle detected: {}", cycle.join(" -> "));
            Err(Error::Cycle(cycle))
        })
    }
}
