pub mod catalog;
pub mod fallback;
pub mod health;
pub mod swagger;
