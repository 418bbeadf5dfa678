use backup_console::auth::SessionService;
use backup_console::errors::{Error, Result};
use backup_console::gateway::Gateway;
use std::io::{self, Write};

fn prompt_password() -> Result<String> {
    print!("Senha: ");
    io::stdout().flush()?;
    let mut password = String::new();
    io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login<G: Gateway>(session: &mut SessionService<G>, email: &str) -> Result<()> {
    let password = prompt_password()?;
    match session.login(email, &password).await {
        Ok(user) => {
            println!("Autenticado como {}.", user.email);
            Ok(())
        }
        Err(Error::InvalidCredentials) => {
            eprintln!("Credenciais inválidas.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub async fn logout<G: Gateway>(session: &mut SessionService<G>) {
    session.ensure_session_restored().await;
    session.logout().await;
    println!("Sessão encerrada.");
}
