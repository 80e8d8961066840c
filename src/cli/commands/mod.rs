pub mod init;
pub mod sync;

mod command_result;

pub use command_result::*;
