use crate::cli::ServidorAction;
use crate::commands::{console_notifier, report_validation, stdin_confirm};
use backup_console::errors::Result;
use backup_console::gateway::Rest;
use backup_console::screens::ServidoresScreen;
use backup_console::screens::servidores::status_label;

pub async fn run(rest: Rest, action: ServidorAction) -> Result<()> {
    let mut screen = ServidoresScreen::new(rest, console_notifier(), stdin_confirm());
    screen.activate().await;

    match action {
        ServidorAction::List => {
            if screen.servidores().is_empty() {
                println!("Nenhum servidor encontrado.");
                return Ok(());
            }
            let rows: Vec<String> = screen
                .servidores()
                .iter()
                .map(|servidor| {
                    format!(
                        "{:>5}  {:<24} {:<18} {:<15} {:<12} {}",
                        servidor.id,
                        screen.cliente_nome(servidor.cliente_id),
                        servidor.nome,
                        servidor.endereco_ip,
                        status_label(servidor.status),
                        servidor.sistema_operacional.as_deref().unwrap_or("—"),
                    )
                })
                .collect();
            for row in rows {
                println!("{row}");
            }
        }
        ServidorAction::Create {
            cliente_id,
            nome,
            ip,
            so,
            status,
        } => {
            screen.show_create_form();
            screen.form.cliente_id = Some(cliente_id);
            screen.form.nome = nome;
            screen.form.endereco_ip = ip;
            screen.form.sistema_operacional = so.unwrap_or_default();
            screen.form.status = status;
            screen.submit().await;
            report_validation(screen.touched(), screen.invalid_fields());
        }
        ServidorAction::Edit {
            id,
            cliente_id,
            nome,
            ip,
            so,
            status,
            mensagem_erro,
        } => {
            let Some(servidor) = screen.servidores().iter().find(|s| s.id == id).cloned() else {
                eprintln!("Servidor {id} não encontrado.");
                return Ok(());
            };
            screen.start_edit(servidor);
            if let Some(cliente_id) = cliente_id {
                screen.form.cliente_id = Some(cliente_id);
            }
            if let Some(nome) = nome {
                screen.form.nome = nome;
            }
            if let Some(ip) = ip {
                screen.form.endereco_ip = ip;
            }
            if let Some(so) = so {
                screen.form.sistema_operacional = so;
            }
            if let Some(status) = status {
                screen.form.status = status;
            }
            if let Some(mensagem_erro) = mensagem_erro {
                screen.form.mensagem_erro = mensagem_erro;
            }
            screen.submit().await;
            report_validation(screen.touched(), screen.invalid_fields());
        }
        ServidorAction::Delete { id } => {
            let Some(servidor) = screen.servidores().iter().find(|s| s.id == id).cloned() else {
                eprintln!("Servidor {id} não encontrado.");
                return Ok(());
            };
            screen.delete(servidor).await;
        }
    }
    Ok(())
}
