pub mod environment;
pub mod terminal;
pub mod timestamps;

pub use environment::{expand_tilde, get_config_path};
pub use terminal::{green, red, strip_ansi_codes, yellow};
pub use timestamps::{format_todo_date, parse_version};
