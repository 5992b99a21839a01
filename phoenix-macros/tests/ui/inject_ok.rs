#![allow(missing_docs)]

use phoenix_di::{ContainerBuilder, Inject};

#[derive(Clone)]
pub struct Config {
    pub url: String,
}

#[derive(Inject)]
pub struct Repository {
    config: Config,
}

#[derive(Inject)]
pub struct Service(Repository, Config);

fn main() {
    let mut container = ContainerBuilder::new();
    container.register(|| Config { url: "localhost".into() });
    container.register_inject::<Repository>();
    container.register_inject::<Service>();

    let service = container
        .try_build()
        .unwrap()
        .resolve::<Service>()
        .unwrap();

    assert_eq!(service.0.config.url, "localhost");
    assert_eq!(service.1.url, "localhost");
}
