pub mod local;

pub use local::LocalCoverStorage;
