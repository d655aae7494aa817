//! Routed views. Each `render` returns the markup that goes inside `<main>`.

pub mod about;
pub mod contact;
pub mod home;
pub mod newsletter;
pub mod not_found;
pub mod press;
