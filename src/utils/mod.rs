mod command_to_string;
mod detect_software;
mod expand_and_resolve_path;

pub use command_to_string::args_to_string;
pub use command_to_string::command_to_string;

pub use detect_software::check_executable;

pub use expand_and_resolve_path::expand_and_resolve_path;
