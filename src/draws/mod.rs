pub mod csv_io;
pub mod generate;
pub mod matrix;
pub mod rng;

pub use csv_io::{export_draws_csv, import_draws_csv};
pub use generate::{generate_draws, ColumnShock};
pub use matrix::{load_draws, save_draws, DrawsError, DrawsMatrix, DEFAULT_DRAWS_PATH};
pub use rng::Rng;
