pub mod auth;
pub mod draft;
pub mod event;
pub mod field;
pub mod guest;
pub mod user;
