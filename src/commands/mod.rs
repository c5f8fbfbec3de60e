pub mod entry;
pub mod history;
pub mod reminders;
