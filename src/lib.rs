#![doc = "The `taskhub` library crate."]
#![doc = ""]
#![doc = "This crate contains the business logic for the TaskHub API: authentication"]
#![doc = "(password hashing, token issuing and the request gate), domain models,"]
#![doc = "route handlers, the activity log and error handling. The binary in"]
#![doc = "`main.rs` uses it to assemble and run the server."]

pub mod activity_log;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod palindrome;
pub mod routes;
