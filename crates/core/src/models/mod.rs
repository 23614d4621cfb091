pub mod appointment;
pub mod availability;
pub mod settings;
pub mod time_slot;
