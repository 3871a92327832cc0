pub mod batch;
pub mod pool;

pub use batch::{batch_ranges, evaluate_on_pool};
pub use pool::WorkerPool;
