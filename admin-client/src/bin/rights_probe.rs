//! rights-probe - print the derived permission of every admin page
//!
//! ```ignore
//! ADMIN_API_URL=http://localhost:8080 ADMIN_USERNAME=editor ADMIN_PASSWORD=secret \
//!     cargo run -p admin-client --bin rights-probe
//! ```

use admin_client::{AdminContext, ClientConfig, logger, pages};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = ClientConfig::from_env();
    logger::init_logger_with_file(&config.log_level, config.log_dir.as_deref());

    let ctx = AdminContext::new(&config).context("failed to build admin context")?;

    if let (Ok(username), Ok(password)) = (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        ctx.login(&username, &password)
            .await
            .with_context(|| format!("login as {username} failed"))?;
    } else if let Err(e) = ctx.ensure_rights_loaded().await {
        tracing::warn!("Role rights unavailable: {}", e);
    }

    match ctx.session().current_user() {
        Some(user) => println!("user: {} (role: {})", user.username, user.role),
        None => println!("user: <not signed in>"),
    }

    for page in pages::ALL_PAGES {
        let p = ctx.resolver().resolve(page);
        println!(
            "{:<20} read={:<5} write={:<5} delete={:<5} {}",
            page,
            p.can_read,
            p.can_write,
            p.can_delete,
            if p.is_form_disabled { "disabled" } else { "enabled" }
        );
    }

    ctx.shutdown().await;
    Ok(())
}
