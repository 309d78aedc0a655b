//! Tags for labelling expenses across categories.

mod create;
mod delete;
mod domain;
mod edit;
mod list;
mod operations;

pub use create::{create_tag_endpoint, get_new_tag_page};
pub use delete::delete_tag_endpoint;
pub use domain::{Tag, TagId, TagName};
pub use edit::{get_edit_tag_page, update_tag_endpoint};
pub use list::{get_tags_page, list_tags_endpoint};
pub use operations::{create_tag, delete_tag, list_tags, update_tag};
