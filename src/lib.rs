pub mod alfred;
pub mod cache;
pub mod client;
pub mod letterboxd;
