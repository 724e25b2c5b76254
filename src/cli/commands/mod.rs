pub mod achievements;
pub mod add;
pub mod checkin;
pub mod config;
pub mod db;
pub mod del;
pub mod health;
pub mod import;
pub mod init;
pub mod item;
pub mod list;
pub mod log;
