// handlers/companies/mod.rs - /companies routes
//
// Reads are public; writes require an admin token.

pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use create::company_create;
pub use delete::company_delete;
pub use list::company_list;
pub use show::company_show;
pub use update::company_update;
