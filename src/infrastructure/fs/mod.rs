//! File System Implementations
//!
//! Concrete implementations of the FileSystem port.

mod home;
mod local;
mod memory;

pub use home::{
    grubwiz_app_dir, grubwiz_config_dir, invoking_user, InvokingUser, APP_DIR, GRUBWIZ_TEST_HOME_VAR,
};
pub use local::LocalFs;
pub use memory::MemoryFs;
