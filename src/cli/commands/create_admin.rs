use anyhow::Context;
use clap::Args;
use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::DatabaseManager;
use crate::models::{ModelError, NewUser, User, Validate};

#[derive(Args, Debug)]
pub struct CreateAdminArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
}

impl From<CreateAdminArgs> for NewUser {
    fn from(args: CreateAdminArgs) -> Self {
        NewUser {
            username: args.username,
            password: args.password,
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            is_admin: true,
        }
    }
}

pub async fn handle(args: CreateAdminArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let new_user = NewUser::from(args);
    new_user.validate().map_err(ModelError::from)?;

    let pool = DatabaseManager::connect(&config::config().database)
        .await
        .context("failed to connect to the database")?;
    let user = User::register(&pool, &new_user).await?;

    output_success(
        &output_format,
        &format!("Created admin {}", user.username),
        Some(json!({ "user": user })),
    )
}
