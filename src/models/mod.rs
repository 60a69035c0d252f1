pub mod post_model;
pub mod tag_model;
