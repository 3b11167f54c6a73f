//! REST API endpoint tests

mod auth_tests;
mod certificate_tests;
mod health_tests;
mod order_tests;
mod tag_tests;
mod user_tests;
