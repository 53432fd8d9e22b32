//! Domain workflows behind the Mars mission site: the crew roster, astronaut
//! selection with e-mail notification, and the photo gallery.

pub mod config;
pub mod crew;
pub mod error;
pub mod filenames;
pub mod gallery;
pub mod selection;
pub mod telemetry;
