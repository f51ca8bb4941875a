//! Cable schedule input.

mod csv;

pub use self::csv::{
    normalize_column_name, parse_csv_file, parse_csv_str, split_csv_rows, ColumnMap,
};
