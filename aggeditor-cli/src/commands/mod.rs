pub mod catalog;
pub mod init;
pub mod replay;

pub use catalog::run_catalog;
pub use init::run_init;
pub use replay::run_replay;
