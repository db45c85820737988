pub mod directors;
pub mod hash;
pub mod jwt;
pub mod sanitize;
