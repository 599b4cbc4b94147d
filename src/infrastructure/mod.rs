pub mod database;
pub mod shift_repo;
pub mod event_repo;
