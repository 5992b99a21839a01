//! Wires a small application at start-up and fills its handlers in place.
//!
//! Run with `RUST_LOG=trace cargo run --example wiring --features macros`.

use phoenix_di::{Container, ContainerBuilder, Error, Inject, Populate};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Clone, Debug)]
struct Settings {
    database_url: String,
    greeting: &'static str,
}

#[derive(Debug)]
struct InvalidUrl(String);

impl std::fmt::Display for InvalidUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported database url: {}", self.0)
    }
}

impl std::error::Error for InvalidUrl {}

#[derive(Clone, Debug)]
struct Database {
    url: String,
}

impl Database {
    fn connect(settings: Settings) -> Result<Self, InvalidUrl> {
        if settings.database_url.starts_with("postgres://") {
            Ok(Self { url: settings.database_url })
        } else {
            Err(InvalidUrl(settings.database_url))
        }
    }
}

#[derive(Clone, Debug, Inject)]
struct UserRepository {
    database: Database,
}

#[derive(Clone, Debug, Inject)]
struct GreetController {
    users: UserRepository,
    settings: Settings,
}

impl GreetController {
    fn handle(&self, name: &str) -> String {
        format!("{}, {name}! (users from {})", self.settings.greeting, self.users.database.url)
    }
}

#[derive(Default, Populate)]
struct Handlers {
    pub greet: Option<GreetController>,
    requests_served: u64,
}

fn wire() -> Result<Container, Error> {
    let mut container = ContainerBuilder::new();
    container
        .register(|controller: GreetController| Some(controller))
        .register_inject::<GreetController>()
        .register_inject::<UserRepository>()
        .try_register(Database::connect)
        .register_value(Settings {
            database_url: "postgres://localhost/phoenix".into(),
            greeting: "Hello",
        });
    container.try_build()
}

fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let container = match wire() {
        Ok(container) => container,
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    };
    container.log_registered();

    let mut handlers = Handlers::default();
    container.populate_or_abort(&mut handlers);

    if let Some(greet) = &handlers.greet {
        tracing::info!("{}", greet.handle("world"));
        handlers.requests_served += 1;
    }

    let banner = container
        .invoke(&|settings: Settings| format!("{} from phoenix", settings.greeting))
        .unwrap_or_else(|err| err.to_string());
    tracing::info!(requests = handlers.requests_served, "{banner}");
}
