#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
mod error;
mod exercise;
mod history;
mod muscle_group;
mod name;
mod service;
mod workout;

pub use error::*;
pub use exercise::*;
pub use history::*;
pub use muscle_group::*;
pub use name::*;
pub use service::*;
pub use workout::*;
