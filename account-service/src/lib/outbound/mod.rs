pub mod notifiers;
pub mod repositories;
