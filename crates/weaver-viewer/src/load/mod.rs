pub mod fetch;
pub mod protocol;

pub use fetch::spawn_loader;
pub use protocol::{Loaded, LoadedKind};
