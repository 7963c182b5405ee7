//! CLI administration tool for AxiomaDocs.
//!
//! Provides commands for managing user accounts, running the expiration
//! recomputation, and inspecting the database without HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create the first administrator
//! cargo run --bin admin -- usuario create --username admin --email admin@example.com --admin
//!
//! # List accounts
//! cargo run --bin admin -- usuario list
//!
//! # Reset a password
//! cargo run --bin admin -- usuario reset-password admin
//!
//! # Recompute estados now
//! cargo run --bin admin -- vencimientos recalcular
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `ESTADO_VIGENTE`, `ESTADO_POR_VENCER`, `ESTADO_VENCIDO` (optional):
//!   estado names used by `vencimientos recalcular`

use axioma_docs::application::expiration_worker::run_once;
use axioma_docs::application::services::usuario_service::NuevoUsuario;
use axioma_docs::application::services::{UsuarioService, VencimientoService};
use axioma_docs::config::EstadoNames;
use axioma_docs::domain::entities::{Rol, UpdateUsuario};
use axioma_docs::domain::repositories::{ListQuery, UsuarioRepository};
use axioma_docs::infrastructure::persistence::{
    PgEstadoRepository, PgUsuarioRepository, PgVencimientoRepository,
};
use axioma_docs::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

const MIN_PASSWORD_LEN: usize = 8;

/// CLI tool for managing AxiomaDocs.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    Usuario {
        #[command(subcommand)]
        action: UsuarioAction,
    },

    /// Expiration tracking
    Vencimientos {
        #[command(subcommand)]
        action: VencimientosAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UsuarioAction {
    /// Create a new account (prompts for the password)
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Grant the admin role
        #[arg(long)]
        admin: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,

    /// Set a new password for an account
    ResetPassword {
        /// Username or e-mail
        login: String,
    },
}

#[derive(Subcommand)]
enum VencimientosAction {
    /// Recompute the estado of every document with an expiration date
    Recalcular,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Usuario { action } => handle_usuario_action(action, &pool).await?,
        Commands::Vencimientos { action } => handle_vencimientos_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_usuario_action(action: UsuarioAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUsuarioRepository::new(Arc::new(pool.clone())));

    match action {
        UsuarioAction::Create {
            username,
            email,
            admin,
            yes,
        } => create_usuario(repo, username, email, admin, yes).await?,
        UsuarioAction::List => list_usuarios(repo).await?,
        UsuarioAction::ResetPassword { login } => reset_password(repo, login).await?,
    }

    Ok(())
}

/// Prompts twice for a password of at least [`MIN_PASSWORD_LEN`] characters.
fn prompt_password() -> Result<String> {
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .validate_with(|input: &String| -> Result<(), String> {
            if input.chars().count() >= MIN_PASSWORD_LEN {
                Ok(())
            } else {
                Err(format!(
                    "Password must be at least {MIN_PASSWORD_LEN} characters"
                ))
            }
        })
        .interact()?;

    Ok(password)
}

/// Creates an account with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for username, e-mail and names (or use provided)
/// 2. Prompt for the password twice
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Hash the password with Argon2id and store the account
async fn create_usuario(
    repo: Arc<PgUsuarioRepository>,
    username: Option<String>,
    email: Option<String>,
    admin: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create account".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("E-mail").interact_text()?,
    };
    let nombre: String = Input::new()
        .with_prompt("Nombre")
        .with_initial_text("Admin")
        .interact_text()?;
    let apellido: String = Input::new()
        .with_prompt("Apellido")
        .with_initial_text("AxiomaDocs")
        .interact_text()?;
    let password = prompt_password()?;

    let rol = if admin { Rol::Admin } else { Rol::Usuario };

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Username: {}", username.cyan());
    println!("  E-mail:   {}", email.cyan());
    println!("  Name:     {} {}", nombre, apellido);
    println!("  Role:     {}", rol.as_str().bright_yellow().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = UsuarioService::new(repo);
    let usuario = service
        .create(NuevoUsuario {
            username,
            email,
            password,
            nombre,
            apellido,
            rol,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Account created with id".green().bold(),
        usuario.id.to_string().bright_white().bold()
    );
    println!();
    println!("{}", "Log in with:".bright_white());
    println!(
        "  curl -X POST http://localhost:3000/api/auth/login -H 'Content-Type: application/json' -d '{{\"username\":\"{}\",\"password\":\"...\"}}'",
        usuario.username
    );
    println!();

    Ok(())
}

/// Lists all accounts with role and status.
///
/// # Output Format
///
/// ```text
/// 📋 Accounts
///
///   ID  Username             E-mail                         Role      Status
///   ──────────────────────────────────────────────────────────────────────────
///   1   admin                admin@example.com              admin     ACTIVE
///   2   operador             operador@example.com           usuario   INACTIVE
/// ```
async fn list_usuarios(repo: Arc<PgUsuarioRepository>) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let usuarios = repo
        .list(ListQuery::new(None, 0, i64::MAX))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if usuarios.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin usuario create --admin",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<9} {:<10}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "E-mail".bright_white().bold(),
        "Role".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for usuario in &usuarios {
        let status = if usuario.activo {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };

        println!(
            "  {:<3} {:<20} {:<30} {:<9} {}",
            usuario.id.to_string().bright_black(),
            usuario.username.cyan(),
            usuario.email,
            usuario.rol.as_str(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        usuarios.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Sets a new password after confirmation. Inactive accounts stay inactive.
async fn reset_password(repo: Arc<PgUsuarioRepository>, login: String) -> Result<()> {
    println!("{}", "🔒 Reset password".bright_blue().bold());
    println!();

    let usuario = repo
        .find_by_login(&login)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Account not found")?;

    println!("  Account: {}", usuario.username.cyan());
    println!("  ID:      {}", usuario.id.to_string().bright_black());
    if !usuario.activo {
        println!("{}", "⚠️  This account is inactive".yellow());
    }
    println!();

    let password = prompt_password()?;

    let confirmed = Confirm::new()
        .with_prompt("Replace the password?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    repo.update(
        usuario.id,
        UpdateUsuario {
            password_hash: Some(password_hash),
            ..Default::default()
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!("Failed to update password: {}", e))?;

    println!();
    println!("{}", "✅ Password updated".green().bold());
    println!();

    Ok(())
}

/// Runs one expiration recomputation with the same retry policy as the
/// server's background worker.
async fn handle_vencimientos_action(action: VencimientosAction, pool: &PgPool) -> Result<()> {
    match action {
        VencimientosAction::Recalcular => {
            println!("{}", "⏳ Recomputing estados...".bright_blue());

            let pool = Arc::new(pool.clone());
            let service = VencimientoService::new(
                Arc::new(PgVencimientoRepository::new(pool.clone())),
                Arc::new(PgEstadoRepository::new(pool)),
                EstadoNames::from_env(),
            );

            let resumen = run_once(&service)
                .await
                .map_err(|e| anyhow::anyhow!("Recomputation failed: {}", e))?;

            println!();
            println!(
                "  Evaluated: {}",
                resumen.evaluados.to_string().bright_white().bold()
            );
            println!(
                "  Updated:   {}",
                resumen.actualizados.to_string().bright_green().bold()
            );
            println!("  Date:      {}", resumen.fecha);
            println!();
        }
    }

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Active recursos and entidades
/// - Document types and assignments
/// - Attachments and active accounts
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let recursos: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM recursos WHERE fecha_baja IS NULL")
            .fetch_one(pool)
            .await?;

    let entidades: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM entidades WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await?;

    let documentaciones: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documentacion")
        .fetch_one(pool)
        .await?;

    let asignaciones: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM recurso_documentacion) \
         + (SELECT COUNT(*) FROM entidad_documentacion)",
    )
    .fetch_one(pool)
    .await?;

    let archivos: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documento_archivos")
        .fetch_one(pool)
        .await?;

    let usuarios: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios WHERE activo")
        .fetch_one(pool)
        .await?;

    println!(
        "  Recursos:        {}",
        recursos.to_string().bright_green().bold()
    );
    println!(
        "  Entidades:       {}",
        entidades.to_string().bright_green().bold()
    );
    println!(
        "  Document types:  {}",
        documentaciones.to_string().bright_green().bold()
    );
    println!(
        "  Assignments:     {}",
        asignaciones.to_string().bright_green().bold()
    );
    println!(
        "  Attachments:     {}",
        archivos.to_string().bright_green().bold()
    );
    println!(
        "  Active accounts: {}",
        usuarios.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
