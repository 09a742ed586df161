pub mod create_item;
pub mod get_item;
pub mod list_items;

pub use create_item::create_item;
pub use get_item::get_item;
pub use list_items::list_items;
