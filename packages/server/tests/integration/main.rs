mod common;

mod avatar;
mod directors;
mod favorites;
mod reviews;
