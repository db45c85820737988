pub mod favorite;
pub mod film;
pub mod film_person;
pub mod person;
pub mod review;
pub mod user;
