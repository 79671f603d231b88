pub mod health;
pub mod pages;
pub mod session;
pub mod sitemap;
pub mod workspace;
