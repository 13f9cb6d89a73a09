//! Services module
//!
//! Business logic services that coordinate between commands and repository.

pub mod friends;
pub mod notes;
pub mod validation;

pub use friends::FriendsService;
pub use notes::NotesService;
