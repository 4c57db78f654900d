pub mod address;
pub mod auth;
pub mod chat;
pub mod complaints;
pub mod contract;
pub mod forum;
pub mod likes;
pub mod matches;
pub mod notifications;
pub mod profile;
pub mod rent;
pub mod reviews;
