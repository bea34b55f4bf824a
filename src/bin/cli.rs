use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use rolegate::modules::auth::{RegistrationError, RegistrationProcessor};
use rolegate::rolegate_config::AuthConfig;
use rolegate::rolegate_core::BcryptHasher;
use rolegate::rolegate_db::{PgUserStore, init_db_pool};
use rolegate::rolegate_models::{RegisterRequestDto, Role};

#[derive(Parser)]
#[command(name = "rolegate-cli")]
#[command(about = "Rolegate CLI - Administrative tools for Rolegate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account through the normal registration rules
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Create the account with the admin role
        #[arg(long)]
        admin: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateUser {
            name,
            email,
            password,
            admin,
        } => handle_create_user(name, email, password, admin).await,
    }
}

async fn handle_create_user(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    admin: bool,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Name")
            .interact_text()
            .context("Failed to read name")?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    let config = AuthConfig::from_env();
    let role = if admin { Role::Admin } else { Role::User };
    let input = RegisterRequestDto {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password,
        role: Some(role.as_str().to_string()),
        admin_code: admin.then(|| config.admin_registration_code.clone()),
        ..Default::default()
    };

    let config = config.with_terms_required(false);
    let processor = RegistrationProcessor::new(
        Arc::new(config.clone()),
        Arc::new(PgUserStore::new(pool)),
        Arc::new(BcryptHasher::new(config.bcrypt_cost)),
    );

    match processor.create(input).await {
        Ok(user) => {
            println!("\n✅ User created successfully!");
            println!("   Email: {}", user.email);
            println!("   Name: {}", user.name);
            println!("   Role: {}", user.role);
            Ok(())
        }
        Err(RegistrationError::Internal(e)) => Err(e.context("Error creating user")),
        Err(e) => {
            eprintln!("\n❌ Error creating user: {e}");
            if let Some(fields) = e.field_errors() {
                for field in fields.fields() {
                    for message in fields.get(field).unwrap_or_default() {
                        eprintln!("   {field}: {message}");
                    }
                }
            }
            std::process::exit(1);
        }
    }
}
