//! Generic constructor for building types

/// A trait that describes a generic constructor function
/// whose parameters are resolved from the DI container.
///
/// Implemented for every `Fn(A1, .., An) -> R` with up to 8 parameters.
/// `Args` is the tuple of the declared parameter types.
pub trait Constructor<Args>: Send + Sync + 'static {
    /// A type of object that will be constructed
    type Output;

    /// Calls the constructor with already resolved arguments
    fn call(&self, args: Args) -> Self::Output;
}

impl<F, R> Constructor<()> for F
where
    F: Fn() -> R + Send + Sync + 'static
{
    type Output = R;

    #[inline]
    fn call(&self, _: ()) -> Self::Output {
        self()
    }
}

macro_rules! define_constructor ({ $($param:ident)* } => {
    impl<F, R, $($param,)*> Constructor<($($param,)*)> for F
    where
        F: Fn($($param),*) -> R + Send + Sync + 'static,
    {
        type Output = R;

        #[inline]
        #[allow(non_snake_case)]
        fn call(&self, ($($param,)*): ($($param,)*)) -> Self::Output {
            (self)($($param,)*)
        }
    }
});

define_constructor! { T1 }
define_constructor! { T1 T2 }
define_constructor! { T1 T2 T3 }
define_constructor! { T1 T2 T3 T4 }
define_constructor! { T1 T2 T3 T4 T5 }
define_constructor! { T1 T2 T3 T4 T5 T6 }
define_constructor! { T1 T2 T3 T4 T5 T6 T7 }
define_constructor! { T1 T2 T3 T4 T5 T6 T7 T8 }
