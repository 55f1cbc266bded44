#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

pub mod id;
pub mod member;
pub mod role;
pub mod target;

pub use twilight_model as discord;
