//! Terminal front end
//!
//! The UI mirrors the server's read views in a [`state::ViewState`] and
//! drives every change through [`app::App`], which calls the server through
//! an [`api::CrmApi`] backend.

pub mod api;
pub mod app;
pub mod command;
pub mod render;
pub mod repl;
pub mod state;

pub use api::{CrmApi, HttpApi, LocalApi};
pub use app::App;
pub use command::UiCommand;
pub use state::ViewState;
