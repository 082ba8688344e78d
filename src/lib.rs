// src/lib.rs

use sea_orm::DatabaseConnection;
use services::reservation_repository::ReservationRepository;

#[derive(Clone)]
pub struct AppState {
    pub reservations: ReservationRepository,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            reservations: ReservationRepository::new(db),
        }
    }
}

pub mod entities {
    pub mod prelude;
    pub mod reservations;
}

pub mod services {
    pub mod pagination;
    pub mod reservation_repository;
    pub mod validation;
}

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod views;
