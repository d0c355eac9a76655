pub mod detect;
pub mod discover;
pub mod notify;
