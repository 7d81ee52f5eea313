/*!
Subcommand dispatch targets.

One file per subcommand; each exposes a clap `*Args` struct and exactly one
`execute_*` function returning `anyhow::Result<()>`. Every `execute_*`
receives the resolved `Settings`, which carries the data root and the client
tool commands.

  src/cmd/
    mod.rs      (this file)
    connect.rs  (ConnectArgs + execute_connect)
    create.rs   (CreateArgs  + execute_create)   alias: snap
    restore.rs  (RestoreArgs + execute_restore)
    list.rs     (ListArgs    + execute_list)
    clear.rs    (ClearArgs   + execute_clear)
    current.rs  (CurrentArgs + execute_current)
    format.rs   (human output helpers)
*/

pub mod clear;
pub mod connect;
pub mod create;
pub mod current;
pub mod format;
pub mod list;
pub mod restore;

pub use clear::{ClearArgs, execute_clear};
pub use connect::{ConnectArgs, execute_connect};
pub use create::{CreateArgs, execute_create};
pub use current::{CurrentArgs, execute_current};
pub use list::{ListArgs, execute_list};
pub use restore::{RestoreArgs, execute_restore};
