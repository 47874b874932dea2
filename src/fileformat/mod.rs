mod error_ids;
mod sample_list;

pub use error_ids::write_error_ids;
pub use sample_list::{parse_sample_ids, read_sample_ids};
