pub mod arrow;
pub mod types;

pub use self::arrow::{build_raw_schema, build_typed_schema, map_to_arrow_type};
