use crate::cli::PlaybookAction;
use crate::commands::{console_notifier, report_validation, stdin_confirm};
use backup_console::errors::Result;
use backup_console::gateway::Rest;
use backup_console::models::PlaybookCommand;
use backup_console::screens::{ExecutePlaybookDialog, PlaybookScreen};

fn print_commands(comandos: &[PlaybookCommand]) {
    if comandos.is_empty() {
        println!("Nenhum comando no playbook.");
        return;
    }
    for command in comandos {
        println!(
            "{:>5}  {:<28} {:<40} {}",
            command.id,
            command.titulo,
            command.descricao.as_deref().unwrap_or("—"),
            command.comando,
        );
    }
}

pub async fn run(rest: Rest, action: PlaybookAction) -> Result<()> {
    let mut screen = PlaybookScreen::new(rest.clone(), console_notifier(), stdin_confirm());
    screen.activate().await;

    match action {
        PlaybookAction::List { filtro } => {
            if let Some(term) = filtro {
                screen.set_filter(&term);
            }
            print_commands(screen.filtered());
        }
        PlaybookAction::Create {
            titulo,
            comando,
            descricao,
        } => {
            screen.show_create_form();
            screen.form.titulo = titulo;
            screen.form.comando = comando;
            screen.form.descricao = descricao.unwrap_or_default();
            screen.submit().await;
            report_validation(screen.touched(), screen.invalid_fields());
        }
        PlaybookAction::Edit {
            id,
            titulo,
            comando,
            descricao,
        } => {
            let Some(command) = screen.comandos().iter().find(|c| c.id == id).cloned() else {
                eprintln!("Comando {id} não encontrado.");
                return Ok(());
            };
            screen.start_edit(command);
            if let Some(titulo) = titulo {
                screen.form.titulo = titulo;
            }
            if let Some(comando) = comando {
                screen.form.comando = comando;
            }
            if let Some(descricao) = descricao {
                screen.form.descricao = descricao;
            }
            screen.submit().await;
            report_validation(screen.touched(), screen.invalid_fields());
        }
        PlaybookAction::Delete { id } => {
            let Some(command) = screen.comandos().iter().find(|c| c.id == id).cloned() else {
                eprintln!("Comando {id} não encontrado.");
                return Ok(());
            };
            screen.delete(command).await;
        }
        PlaybookAction::Exec {
            id,
            cliente,
            tarefa,
        } => {
            let Some(command) = screen.comandos().iter().find(|c| c.id == id).cloned() else {
                eprintln!("Comando {id} não encontrado.");
                return Ok(());
            };
            let mut dialog = ExecutePlaybookDialog::new(rest, console_notifier(), command);
            dialog.activate().await;
            if let Some(cliente) = cliente {
                dialog.select_client(&cliente);
            }
            if let Some(tarefa) = tarefa {
                dialog.nome_tarefa = tarefa;
            }
            dialog.submit().await;
            report_validation(dialog.touched(), dialog.invalid_fields());
        }
    }
    Ok(())
}
