pub mod helm;
pub mod inspect;
pub mod variants;
