//! `SeaORM` Entity prelude

pub use super::reservations::Entity as Reservations;
