pub mod purge;
pub mod version;

use crate::cli::PurgeArgs;

#[derive(Debug, Clone)]
pub enum Command {
    Version,
    Purge(PurgeArgs),
}
