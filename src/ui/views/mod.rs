pub mod backups;
pub mod check;
pub mod diff;
pub mod show;
