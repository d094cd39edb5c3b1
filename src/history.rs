pub mod history;
pub mod snapshot;

pub use history::History;
pub use snapshot::Snapshot;
