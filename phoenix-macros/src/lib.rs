//! Derive macros for the phoenix-di container
//!

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod di;

/// Implements the `Populate` trait for a struct.
///
/// Every field that is not private (`pub`, `pub(crate)`, `pub(super)`, `pub(in ..)`)
/// is resolved from the container by its type and assigned in declaration order.
/// Private fields keep their value.
///
/// # Example
/// ```
/// use phoenix_di::{ContainerBuilder, Populate};
///
/// #[derive(Clone)]
/// pub struct Service;
///
/// #[derive(Populate)]
/// struct App {
///     pub service: Option<Service>,
///     port: u16,
/// }
///
/// let mut container = ContainerBuilder::new();
/// container.register(|| Some(Service));
///
/// let mut app = App { service: None, port: 8080 };
/// container.build().populate(&mut app).unwrap();
///
/// assert!(app.service.is_some());
/// assert_eq!(app.port, 8080);
/// ```
///
/// # Errors
/// Only structs can be populated:
/// ```compile_fail
/// use phoenix_di::Populate;
///
/// #[derive(Populate)]
/// enum App {
///     Started,
///     Stopped,
/// }
/// ```
#[proc_macro_derive(Populate)]
pub fn derive_populate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    di::expand_populate(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements the `Inject` trait for a struct by resolving every field by its type
///
/// The struct must not implement `Default`, such types already build
/// themselves through `Default::default`.
///
/// # Example
/// ```
/// use phoenix_di::{ContainerBuilder, Inject};
///
/// #[derive(Clone)]
/// struct Config { url: String }
///
/// #[derive(Inject)]
/// struct Repository {
///     config: Config,
/// }
///
/// let mut container = ContainerBuilder::new();
/// container.register(|| Config { url: "localhost".into() });
/// container.register_inject::<Repository>();
///
/// let repo = container.try_build().unwrap().resolve::<Repository>().unwrap();
/// assert_eq!(repo.config.url, "localhost");
/// ```
#[proc_macro_derive(Inject)]
pub fn derive_inject(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    di::expand_inject(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
