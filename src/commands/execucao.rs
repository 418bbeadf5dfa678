use crate::cli::ExecAction;
use crate::commands::{console_notifier, report_validation};
use backup_console::errors::Result;
use backup_console::gateway::Rest;
use backup_console::screens::ExecucaoScreen;

pub async fn run(rest: Rest, action: ExecAction) -> Result<()> {
    let mut screen = ExecucaoScreen::new(rest, console_notifier());
    screen.activate().await;

    match action {
        ExecAction::Run {
            tarefa,
            comando,
            cliente,
            servidor,
        } => {
            if let Some(cliente) = cliente {
                screen.select_client(&cliente).await;
            }
            if let Some(servidor) = servidor {
                screen.select_servidor(&servidor);
            }
            screen.nome_tarefa = tarefa;
            screen.comando = comando;
            screen.submit().await;
            report_validation(screen.touched(), screen.invalid_fields());
        }
        ExecAction::Historico { cliente } => {
            if let Some(cliente) = cliente {
                screen.select_client(&cliente).await;
            }
            let Some(client_id) = screen.selected_client() else {
                println!("Nenhum cliente cadastrado.");
                return Ok(());
            };
            println!("Histórico recente de {client_id}:");
            if screen.historico().is_empty() {
                println!("Nenhuma execução registrada.");
                return Ok(());
            }
            for item in screen.historico() {
                println!(
                    "{}  {:<15} {:<24} {}",
                    item.created_at.format("%Y-%m-%d %H:%M"),
                    item.servidor_ip.as_deref().unwrap_or("—"),
                    item.nome_tarefa,
                    item.comando,
                );
            }
        }
    }
    Ok(())
}
