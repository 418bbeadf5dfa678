use crate::cli::AgendamentoAction;
use crate::commands::{console_notifier, report_validation, stdin_confirm};
use backup_console::errors::Result;
use backup_console::gateway::Rest;
use backup_console::models::Agendamento;
use backup_console::screens::AgendamentosScreen;

fn print_agendamentos(agendamentos: &[Agendamento]) {
    if agendamentos.is_empty() {
        println!("Nenhum agendamento encontrado.");
        return;
    }
    for item in agendamentos {
        println!(
            "{:>5}  {:<14} {:<24} {:<16} {:<8} {}",
            item.id,
            item.client_id,
            item.schedule_name,
            item.cron_expression,
            if item.is_active { "ativo" } else { "inativo" },
            item.rclone_command,
        );
    }
}

pub async fn run(rest: Rest, action: AgendamentoAction) -> Result<()> {
    let mut screen = AgendamentosScreen::new(rest, console_notifier(), stdin_confirm());
    screen.activate().await;

    match action {
        AgendamentoAction::List { filtro } => {
            if let Some(term) = filtro {
                screen.set_filter(&term);
            }
            print_agendamentos(screen.filtered());
        }
        AgendamentoAction::Create {
            cliente,
            nome,
            comando,
            cron,
            remote_path,
            inativo,
        } => {
            screen.show_create_form();
            screen.form.client_id = cliente;
            screen.form.schedule_name = nome;
            screen.form.rclone_command = comando;
            screen.form.cron_expression = cron;
            screen.form.remote_path = remote_path.unwrap_or_default();
            screen.form.is_active = !inativo;
            screen.submit().await;
            report_validation(screen.touched(), screen.invalid_fields());
        }
        AgendamentoAction::Edit {
            id,
            cliente,
            nome,
            comando,
            cron,
            remote_path,
            ativo,
        } => {
            let Some(agendamento) = screen.agendamentos().iter().find(|a| a.id == id).cloned()
            else {
                eprintln!("Agendamento {id} não encontrado.");
                return Ok(());
            };
            screen.start_edit(agendamento);
            if let Some(cliente) = cliente {
                screen.form.client_id = cliente;
            }
            if let Some(nome) = nome {
                screen.form.schedule_name = nome;
            }
            if let Some(comando) = comando {
                screen.form.rclone_command = comando;
            }
            if let Some(cron) = cron {
                screen.form.cron_expression = cron;
            }
            if let Some(remote_path) = remote_path {
                screen.form.remote_path = remote_path;
            }
            if let Some(ativo) = ativo {
                screen.form.is_active = ativo;
            }
            screen.submit().await;
            report_validation(screen.touched(), screen.invalid_fields());
        }
        AgendamentoAction::Delete { id } => {
            let Some(agendamento) = screen.agendamentos().iter().find(|a| a.id == id).cloned()
            else {
                eprintln!("Agendamento {id} não encontrado.");
                return Ok(());
            };
            screen.delete(agendamento).await;
        }
    }
    Ok(())
}
