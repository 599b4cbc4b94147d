pub mod calendar;
pub mod commands;
pub mod digest;
pub mod dto;
pub mod render;
pub mod time;
