//! Data directory, file naming and the instance lock
//!
//! The collections themselves are opened through
//! [`storage`](crate::storage); this module only knows where files live and
//! what they are called.

pub mod lock;
pub mod paths;

// Re-export commonly used types
pub use lock::InstanceLock;
pub use paths::{
    default_data_dir, transfer_filename, validate_transfer_filename, DataDirectory, DATA_DIR_ENV,
};
