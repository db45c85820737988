pub mod auth;
pub mod avatar;
pub mod director;
pub mod favorite;
pub mod film;
pub mod person;
pub mod profile;
pub mod review;
