// Infrastructure layer: external concerns (file loading, result output)

pub mod loader;
pub mod report;

pub use loader::{load_instance, parse_instance, LoadError};
pub use report::{print_frontier, render_frontier};
