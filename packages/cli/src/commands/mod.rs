pub mod apply;
pub mod init;
pub mod show;
pub mod tables;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use show::{show, ShowArgs};
pub use tables::{delete, list, new_table, rename, DeleteArgs, NewArgs, RenameArgs};
