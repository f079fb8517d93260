pub mod action;
pub mod constants;
pub mod error;
pub mod event;
pub mod invoke;
pub mod types;

pub use action::*;
pub use constants::*;
pub use error::BursarError;
pub use event::Notification;
pub use invoke::*;
pub use types::*;
