pub mod auth;
pub mod director;
pub mod favorite;
pub mod film;
pub mod person;
pub mod profile;
pub mod review;
pub mod shared;
