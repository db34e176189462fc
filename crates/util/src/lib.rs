pub mod path_processing;
pub mod text_processing;

pub use path_processing::{expand_tilde, resolve_config_path};
pub use text_processing::{display_width, pad_to_width, title_case_camel, truncate_to_width};
