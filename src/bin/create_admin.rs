//! Bootstrap tool: promotes an existing account to admin, or creates one.
//! The admin role can otherwise only be granted by another admin, so the
//! first admin has to come from here.

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use todolist::auth::password::hash_password;
use todolist::store::postgres::PgUserStore;
use todolist::store::{Role, UserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "todolist=info,create_admin=info".to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is missing")?;
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".into());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());

    let db = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .context("connect to database")?;
    let users = PgUserStore::new(db);

    let email = email.trim().to_lowercase();
    match users.find_by_email(&email).await? {
        Some(user) => {
            users
                .set_role(user.id, Role::Admin)
                .await?
                .context("user disappeared during promotion")?;
            info!(user_id = %user.id, email = %email, "existing user promoted to admin");
        }
        None => {
            let hash = hash_password(&password)?;
            let user = users.create(&email, &hash).await?;
            users
                .set_role(user.id, Role::Admin)
                .await?
                .context("user disappeared during promotion")?;
            info!(user_id = %user.id, email = %email, "admin user created");
        }
    }

    Ok(())
}
