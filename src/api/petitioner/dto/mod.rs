pub mod dashboard;
pub mod signin;
