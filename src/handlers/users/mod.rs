// handlers/users/mod.rs - /users routes
//
// Creating and listing users is admin-only. Everything under
// /users/:username is open to that user and to admins.

pub mod apply;
pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use apply::user_apply;
pub use create::user_create;
pub use delete::user_delete;
pub use list::user_list;
pub use show::user_show;
pub use update::user_update;
