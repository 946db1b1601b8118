pub mod contact;
pub mod post;
