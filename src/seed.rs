// One-shot startup seeding
// Creates the configured admin account when it does not exist yet; runs
// after migrations, before the server starts accepting requests.

use sqlx::PgPool;

use crate::auth::{error::AuthError, password::PasswordService, repository::UserRepository};
use crate::config::AppConfig;

pub async fn run(pool: &PgPool, config: &AppConfig) -> Result<(), AuthError> {
    let Some(seed) = &config.seed_admin else {
        tracing::debug!("No seed admin configured, skipping seeding");
        return Ok(());
    };

    let users = UserRepository::new(pool.clone());

    if users.email_exists(&seed.email).await? {
        tracing::debug!("Seed admin already present, skipping seeding");
        return Ok(());
    }

    let password_hash = PasswordService::hash_password(&seed.password)?;
    let user = users
        .create_user(&seed.name, &seed.email, &password_hash, true)
        .await?;

    tracing::info!(user_id = %user.id, email = %seed.email, "Seeded admin user");
    Ok(())
}
