pub mod app;
pub mod config;
pub mod counter;
pub mod credentials;
pub mod errors;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod mutator;
pub mod persister;
pub mod prompt;
pub mod session;
pub mod state;
pub mod storage;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::Config;
pub use counter::{Counter, Outcome};
pub use models::ProjectState;
pub use state::AppState;
pub use view::View;
