//! Type-keyed dependency injection
//!
//! Builders are registered per produced type into a [`ContainerBuilder`],
//! which is then frozen into a read-only [`Container`]. Resolving a type builds
//! every dependency of its builder first, depth-first and left to right, and
//! nothing is cached between resolutions.
//!
//! # Example
//! ```
//! use phoenix_di::{ContainerBuilder, Error};
//!
//! #[derive(Clone)]
//! struct Config { dsn: String }
//! struct Repository { dsn: String }
//! struct Service { repo: Repository }
//!
//! let mut container = ContainerBuilder::new();
//! container.register(|repo: Repository| Service { repo });
//! container.register(|config: Config| Repository { dsn: config.dsn });
//! container.register(|| Config { dsn: "postgres://localhost/app".into() });
//!
//! let container = container.try_build().unwrap();
//! let service = container.resolve::<Service>().unwrap();
//! assert_eq!(service.repo.dsn, "postgres://localhost/app");
//!
//! struct Unknown;
//! assert!(matches!(container.resolve::<Unknown>(), Err(Error::NotRegistered(_))));
//! ```

pub use crate::{
    container::{Container, ContainerBuilder, Constructor, FromResolver, Resolver},
    error::Error,
    inject::Inject,
    key::TypeKey,
    populate::{Field, Fields, Populate},
};

#[cfg(feature = "macros")]
pub use phoenix_macros::{Inject, Populate};

pub mod error;
pub mod container;
pub mod inject;
pub mod populate;
mod key;
