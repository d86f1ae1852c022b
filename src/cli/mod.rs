pub mod admin;
pub mod currency;
pub mod setup;
pub mod store;
pub mod suggest;
pub mod ui;
