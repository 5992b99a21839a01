#![allow(missing_docs)]

use phoenix_di::{ContainerBuilder, Populate};

#[derive(Clone)]
pub struct Config {
    pub url: String,
}

pub struct Service {
    pub config: Config,
}

#[derive(Populate)]
pub struct App {
    pub service: Service,
    pub(crate) config: Config,
    retries: u8,
}

fn main() {
    let mut container = ContainerBuilder::new();
    container.register(|| Config { url: "localhost".into() });
    container.register(|config: Config| Service { config });
    let container = container.build();

    let mut app = App {
        service: Service { config: Config { url: String::new() } },
        config: Config { url: String::new() },
        retries: 3,
    };
    container.populate_or_abort(&mut app);

    assert_eq!(app.service.config.url, "localhost");
    assert_eq!(app.config.url, "localhost");
    assert_eq!(app.retries, 3);
}
