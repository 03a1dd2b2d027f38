pub mod link_loader;
pub mod toml_loader;

pub use link_loader::load_raw_links;
pub use toml_loader::load_profile;
