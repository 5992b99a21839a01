//! Extractors for constructor parameters

use crate::{TypeKey, error::Error};
use super::Resolver;

/// A trait that defines how to resolve a tuple of constructor parameters.
///
/// Parameters are resolved strictly left to right, each one with its whole
/// dependency subtree before the next one starts.
pub trait FromResolver: Sized {
    /// Appends the declared parameter types in their declared order
    fn dependencies(keys: &mut Vec<TypeKey>);

    /// Resolves every parameter
    fn from_resolver(resolver: &mut Resolver<'_>) -> Result<Self, Error>;
}

impl FromResolver for () {
    #[inline]
    fn dependencies(_: &mut Vec<TypeKey>) {}

    #[inline]
    fn from_resolver(_: &mut Resolver<'_>) -> Result<Self, Error> {
        Ok(())
    }
}

macro_rules! define_generic_from_resolver {
    ($($T: ident),*) => {
        impl<$($T: 'static),+> FromResolver for ($($T,)+) {
            #[inline]
            fn dependencies(keys: &mut Vec<TypeKey>) {
                $(
                keys.push(TypeKey::of::<$T>());
                )*
            }

            #[inline]
            #[allow(non_snake_case)]
            fn from_resolver(resolver: &mut Resolver<'_>) -> Result<Self, Error> {
                let tuple = (
                    $(
                    resolver.resolve::<$T>()?,
                    )*
                );
                Ok(tuple)
            }
        }
    }
}

define_generic_from_resolver! { T1 }
define_generic_from_resolver! { T1, T2 }
define_generic_from_resolver! { T1, T2, T3 }
define_generic_from_resolver! { T1, T2, T3, T4 }
define_generic_from_resolver! { T1, T2, T3, T4, T5 }
define_generic_from_resolver! { T1, T2, T3, T4, T5, T6 }
define_generic_from_resolver! { T1, T2, T3, T4, T5, T6, T7 }
define_generic_from_resolver! { T1, T2, T3, T4, T5, T6, T7, T8 }

#[cfg(test)]
mod tests {
    use crate::{ContainerBuilder, TypeKey};
    use super::*;

    #[derive(Debug, Clone, Copy)]
    struct Config {
        port: u16
    }

    #[derive(Debug, Clone, Copy)]
    struct Pool;

    #[test]
    fn it_declares_dependencies_in_order() {
        let mut keys = Vec::new();
        <(Config, Pool, Config)>::dependencies(&mut keys);

        assert_eq!(keys, [TypeKey::of::<Config>(), TypeKey::of::<Pool>(), TypeKey::of::<Config>()]);
    }

    #[test]
    fn it_declares_nothing_for_unit() {
        let mut keys = Vec::new();
        <()>::dependencies(&mut keys);

        assert!(keys.is_empty());
    }

    #[test]
    fn it_resolves_tuple() {
        let mut container = ContainerBuilder::new();
        container.register(|| Config { port: 8080 });
        container.register(|| Pool);

        let container = container.build();
        let mut resolver = container.resolver();

        let (config, _pool) = <(Config, Pool)>::from_resolver(&mut resolver).unwrap();

        assert_eq!(config.port, 8080);
    }

    #[test]
    fn it_reports_first_missing_parameter() {
        let mut container = ContainerBuilder::new();
        container.register(|| Config { port: 8080 });

        let container = container.build();
        let mut resolver = container.resolver();

        let err = <(Config, Pool)>::from_resolver(&mut resolver).unwrap_err();

        assert_eq!(err.to_string(), "Injector Error: builder not found for type: phoenix_di::container::from_resolver::tests::Pool");
    }
}
