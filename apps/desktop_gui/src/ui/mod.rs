//! UI layer: the eframe app shell and per-screen rendering.

pub mod app;

pub use app::CompaniesApp;
