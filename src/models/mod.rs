// Models module for data structures
pub mod api;
pub mod session;
pub mod view;
