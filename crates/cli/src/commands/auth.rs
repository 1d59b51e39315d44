//! Account commands: sign in, register, profile, sign out.
//!
//! # Usage
//!
//! ```bash
//! mm-cli auth login -e rosa@minimarketroque.pe -p secret
//! mm-cli auth register -f Maria -l Roque -e maria@example.com \
//!     -d 12345678 -t 999888777 -p secret -c secret
//! mm-cli auth whoami
//! mm-cli auth update-profile --phone 911222333 -p secret
//! mm-cli auth logout
//! ```

use clap::Subcommand;
use minimarket_storefront::{NewAccount, ProfileEdit, SessionError};

use crate::context::AppContext;
use crate::output;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create a customer account and sign in as it
    Register {
        #[arg(short = 'f', long)]
        first_name: String,

        #[arg(short = 'l', long)]
        last_name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        dni: String,

        #[arg(short = 't', long)]
        phone: String,

        #[arg(short, long)]
        password: String,

        /// Must match the password
        #[arg(short, long)]
        confirm_password: String,
    },
    /// Show the signed-in account
    Whoami,
    /// Edit the signed-in account's profile
    UpdateProfile {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        dni: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Current or new password; the backend requires it on every edit
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and empty the cart
    Logout,
}

pub async fn run(ctx: &AppContext, action: AuthAction) -> Result<(), SessionError> {
    match action {
        AuthAction::Login { email, password } => {
            let user = ctx.session.login(&email, &password).await?;
            output::line(&format!(
                "Signed in as {} ({})",
                user.full_name(),
                user.role.name
            ));
        }
        AuthAction::Register {
            first_name,
            last_name,
            email,
            dni,
            phone,
            password,
            confirm_password,
        } => {
            let user = ctx
                .session
                .register(NewAccount {
                    first_name,
                    last_name,
                    email,
                    dni,
                    phone,
                    password,
                    confirm_password,
                })
                .await?;
            output::line(&format!("Welcome, {}. You are signed in.", user.full_name()));
        }
        AuthAction::Whoami => match ctx.session.current_user() {
            Some(user) => output::line(&format!(
                "{} <{}> ({})",
                user.full_name(),
                user.email,
                user.role.name
            )),
            None => output::line("Not signed in."),
        },
        AuthAction::UpdateProfile {
            first_name,
            last_name,
            email,
            dni,
            phone,
            password,
        } => {
            let user = ctx
                .session
                .current_user()
                .ok_or(SessionError::NotAuthenticated)?;
            let edit = ProfileEdit {
                first_name: first_name.unwrap_or(user.first_name),
                last_name: last_name.unwrap_or(user.last_name),
                email: email.unwrap_or(user.email),
                dni: dni.unwrap_or(user.dni),
                phone: phone.unwrap_or(user.phone),
                password,
                image: user.image,
            };
            let updated = ctx.session.update_profile(edit).await?;
            output::line(&format!("Profile updated for {}.", updated.full_name()));
        }
        AuthAction::Logout => {
            // Signing out abandons the pending purchase too.
            ctx.session.logout().await;
            ctx.cart.clear();
            output::line("Signed out.");
        }
    }
    Ok(())
}
