#![allow(missing_docs)]

use phoenix_di::{ContainerBuilder, Error, Inject, Populate, TypeKey};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering}
};

#[derive(Debug, Clone, PartialEq)]
struct Config {
    dsn: String
}

#[derive(Debug, Clone, Inject)]
struct Repository {
    config: Config
}

#[derive(Debug, Clone, Inject)]
struct Service {
    repository: Repository,
    config: Config
}

#[derive(Populate)]
struct Application {
    pub service: Option<Service>,
    pub(crate) name: &'static str,
    counter: i32
}

#[derive(Populate)]
struct Handlers {
    pub first: Service,
    pub second: Service
}

fn container() -> ContainerBuilder {
    let mut container = ContainerBuilder::new();
    container.register(|| Config { dsn: "postgres://localhost/app".into() });
    container.register_inject::<Repository>();
    container.register_inject::<Service>();
    container.register(|service: Service| Some(service));
    container.register(|| "phoenix");
    container
}

#[test]
fn it_populates_exported_fields_and_skips_private() {
    let container = container().try_build().unwrap();

    let mut app = Application { service: None, name: "", counter: 42 };
    container.populate(&mut app).unwrap();

    let service = app.service.unwrap();
    assert_eq!(service.config.dsn, "postgres://localhost/app");
    assert_eq!(service.repository.config, service.config);
    assert_eq!(app.name, "phoenix");
    assert_eq!(app.counter, 42);
}

#[test]
fn it_resolves_each_field_independently() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut container = container();
    let counter = calls.clone();
    container.register(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Config { dsn: "sqlite::memory:".into() }
    });
    let container = container.build();

    assert_eq!(Handlers::fields().len(), 2);

    let mut target = Handlers {
        first: container.resolve::<Service>().unwrap(),
        second: container.resolve::<Service>().unwrap()
    };
    calls.store(0, Ordering::SeqCst);

    container.populate(&mut target).unwrap();

    // two fields, each with a Service that needs Config twice
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(target.first.config.dsn, "sqlite::memory:");
}

#[test]
fn it_declares_derived_dependencies() {
    let container = container().build();

    assert_eq!(
        container.dependencies_of(&TypeKey::of::<Service>()),
        Some([TypeKey::of::<Repository>(), TypeKey::of::<Config>()].as_slice())
    );
}

#[test]
fn it_reports_missing_field_dependency() {
    let mut container = ContainerBuilder::new();
    container.register_inject::<Repository>();
    container.register_inject::<Service>();
    container.register(|service: Service| Some(service));
    container.register(|| "phoenix");

    let err = container.build()
        .populate(&mut Application { service: None, name: "", counter: 0 })
        .unwrap_err();

    assert!(matches!(err, Error::NotRegistered(name) if name == TypeKey::of::<Config>().name()));
}
