pub mod create_post;
pub mod delete_post;
pub mod edit_post;
pub mod form;
pub mod get_post;
pub mod list_posts;

pub use create_post::create_post;
pub use delete_post::delete_post;
pub use edit_post::edit_post;
pub use get_post::get_post;
pub use list_posts::list_posts;
