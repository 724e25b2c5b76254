pub mod achievement;
pub mod checkin;
pub mod food;
pub mod health;
pub mod item;
pub mod log;
