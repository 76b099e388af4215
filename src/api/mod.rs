mod handlers;
mod state;
pub mod types;
mod utils;

pub use state::{AppState, router};
