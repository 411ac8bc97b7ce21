pub mod auth;
pub mod chat;
pub mod coach;
pub mod health;
