//! Describes dependency resolution errors

use std::{
    any::Any,
    error::Error as StdError,
    fmt::{Display, Formatter},
    sync::Arc
};

/// A shared, type-erased error raised by a fallible constructor
pub type BoxError = Arc<
    dyn StdError
    + Send
    + Sync
>;

/// An error raised while registering, resolving or populating
#[derive(Debug, Clone)]
pub enum Error {
    /// No container is stored in the request extensions
    ContainerMissing,
    /// Free-form failure raised by a hand-written [`Inject`](crate::Inject) impl
    Other(&'static str),
    /// A builder produced a value of an unexpected type
    ResolveFailed(&'static str),
    /// The requested or a transitively required type has no builder
    NotRegistered(&'static str),
    /// A type was requested again while it was still under construction.
    ///
    /// Holds the resolution path from the first occurrence to the re-entry,
    /// so the first and the last names are equal.
    Cycle(Vec<&'static str>),
    /// A fallible constructor returned an error
    ConstructorFailed {
        /// The type the constructor produces
        type_name: &'static str,
        /// The error returned by the constructor
        source: BoxError
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ContainerMissing => write!(f, "Injector Error: DI container is missing"),
            Error::Other(msg) => write!(f, "{msg}"),
            Error::ResolveFailed(type_name) => write!(f, "Injector Error: unable to resolve the type: {type_name}"),
            Error::NotRegistered(type_name) => write!(f, "Injector Error: builder not found for type: {type_name}"),
            Error::Cycle(path) => write!(f, "Injector Error: dependency cycle detected: {}", path.join(" -> ")),
            Error::ConstructorFailed { type_name, source } =>
                write!(f, "Injector Error: builder for type {type_name} failed: {source}")
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::ConstructorFailed { source, .. } => Some(source.as_ref()),
            _ => None
        }
    }
}

impl Error {
    /// Wraps an error returned by a fallible constructor of `type_name`.
    ///
    /// Errors raised by the container itself pass through unchanged.
    pub(crate) fn constructor_failed<E>(type_name: &'static str, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static
    {
        match (&err as &dyn Any).downcast_ref::<Error>() {
            Some(inner) => inner.clone(),
            None => Self::ConstructorFailed { type_name, source: Arc::new(err) }
        }
    }
}
