pub mod auth;
pub mod kml;
