pub mod config;
pub mod fs_op;
pub mod nav;
pub mod vault;

pub use crate::fs_op::entry::FileEntry;
pub use crate::fs_op::error::OpError;
pub use crate::nav::NavigationHistory;
pub use crate::vault::{Vault, VaultRegistry};
