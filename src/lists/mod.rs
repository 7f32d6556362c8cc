pub mod directory;
pub mod types;

pub use directory::SpinListDirectory;
pub use types::*;
