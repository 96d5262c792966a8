// handlers/jobs/mod.rs - /jobs routes
//
// Reads are public; writes require an admin token.

pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use create::job_create;
pub use delete::job_delete;
pub use list::job_list;
pub use show::job_show;
pub use update::job_update;
