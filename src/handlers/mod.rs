pub mod admin;
pub mod animal;
pub mod auth;
pub mod collar;
pub mod kml;
pub mod milk;
pub mod ranch;
pub mod station;
pub mod wellindex;
