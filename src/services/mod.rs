// Services module for the action backend, the host and the controller
pub mod action_client;
pub mod controller;
pub mod host;
