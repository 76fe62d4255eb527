pub mod advancement;
pub mod bracket;
pub mod engine;
pub mod error;
pub mod handler;
pub mod ical;
pub mod model;
pub mod priority;
pub mod rest;
pub mod round_robin;
pub mod settings;
pub mod store;
pub mod time_slots;
