pub mod payload;
pub mod reservation;
