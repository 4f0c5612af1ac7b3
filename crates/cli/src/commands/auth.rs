//! congress login / logout / whoami / register / reset-password

use crate::output::Output;
use app::AppCore;
use clap::Args;
use dialoguer::{Input, Password};
use rbac::is_admin_user;

#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Account email (prompted when omitted)
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "CONGRESS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl LoginCommand {
    pub async fn run(&self, core: &AppCore, out: &Output) -> anyhow::Result<()> {
        let email = match &self.email {
            Some(email) => email.clone(),
            None => Input::<String>::new().with_prompt("Email").interact_text()?,
        };
        let password = match &self.password {
            Some(password) => password.clone(),
            None => Password::new().with_prompt("Contraseña").interact()?,
        };

        let user = out
            .spin("Iniciando sesión...", core.session().login(&email, &password))
            .await?;
        out.success(&format!("Sesión iniciada como {} <{}>", user.name, user.email));
        Ok(())
    }
}

pub async fn logout(core: &AppCore, out: &Output) -> anyhow::Result<()> {
    out.spin("Cerrando sesión...", core.session().logout()).await?;
    out.success("Sesión cerrada");
    Ok(())
}

pub fn whoami(core: &AppCore, out: &Output) -> anyhow::Result<()> {
    let user = core.session().current_user();
    out.render(&user, |user| match user {
        Some(user) => {
            println!("{} <{}> (id {})", user.name, user.email, user.id);
            let roles = user.role_names();
            if roles.is_empty() {
                println!("Roles: -");
            } else {
                println!("Roles: {}", roles.join(", "));
            }
            if is_admin_user(core.store()) {
                println!("Administrador");
            }
        }
        None => println!("No hay sesión activa"),
    })
}

#[derive(Debug, Args)]
pub struct RegisterCommand {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Account email
    #[arg(long)]
    pub email: String,

    /// Role to request
    #[arg(long)]
    pub role_id: Option<i64>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "CONGRESS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl RegisterCommand {
    pub async fn run(&self, core: &AppCore, out: &Output) -> anyhow::Result<()> {
        let password = match &self.password {
            Some(password) => password.clone(),
            None => Password::new()
                .with_prompt("Contraseña")
                .with_confirmation("Repite la contraseña", "Las contraseñas no coinciden")
                .interact()?,
        };

        let message = out
            .spin(
                "Registrando...",
                core.session()
                    .register(&self.name, &self.email, &password, self.role_id),
            )
            .await?;
        out.success(if message.is_empty() { "Registro completado" } else { message.as_str() });
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ResetPasswordCommand {
    /// Account email
    pub email: String,
}

impl ResetPasswordCommand {
    pub async fn run(&self, core: &AppCore, out: &Output) -> anyhow::Result<()> {
        let password = Password::new()
            .with_prompt("Nueva contraseña")
            .with_confirmation("Repite la contraseña", "Las contraseñas no coinciden")
            .interact()?;

        let message = out
            .spin(
                "Restableciendo contraseña...",
                core.session().reset_password(&self.email, &password),
            )
            .await?;
        out.success(if message.is_empty() { "Contraseña actualizada" } else { message.as_str() });
        Ok(())
    }
}
