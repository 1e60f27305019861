pub mod auth_service;
pub mod draft_sync;
pub mod export;
pub mod grouping;
pub mod guest_filter;
pub mod slug;
pub mod validation;
