pub mod shift_model;
pub mod date_range;
pub mod opening_hours;
pub mod ordering;
pub mod reconcile;
pub mod grouping;
