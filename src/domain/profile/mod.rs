//! Profile module - raw provider profiles and their normalized view.

mod normalized;
mod user_profile;

pub use normalized::{clean_username, compose_birthday, NormalizedProfile};
pub use user_profile::{ActivityAuthor, UserActivity, UserContact, UserProfile};
