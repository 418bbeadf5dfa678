use crate::cli::ClienteAction;
use crate::commands::{console_notifier, report_validation, stdin_confirm};
use backup_console::errors::Result;
use backup_console::gateway::Rest;
use backup_console::models::Cliente;
use backup_console::screens::ClientesScreen;

fn print_clientes(clientes: &[Cliente]) {
    if clientes.is_empty() {
        println!("Nenhum cliente encontrado.");
        return;
    }
    for cliente in clientes {
        println!(
            "{:>5}  {:<16} {:<32} {:<20} {}",
            cliente.id,
            cliente.client_id,
            cliente.nome_empresa,
            cliente.cnpj_empresa,
            if cliente.ativo { "ativo" } else { "inativo" }
        );
    }
}

pub async fn run(rest: Rest, action: ClienteAction) -> Result<()> {
    let mut screen = ClientesScreen::new(rest, console_notifier(), stdin_confirm());
    screen.activate().await;

    match action {
        ClienteAction::List { filtro } => {
            if let Some(term) = filtro {
                screen.set_filter(&term);
            }
            print_clientes(screen.filtered());
        }
        ClienteAction::Create {
            client_id,
            nome,
            cnpj,
            inativo,
        } => {
            screen.show_create_form();
            screen.form.client_id = client_id;
            screen.form.nome_empresa = nome;
            screen.form.cnpj_empresa = cnpj;
            screen.apply_cnpj_mask();
            screen.form.ativo = !inativo;
            screen.submit().await;
            report_validation(screen.touched(), screen.invalid_fields());
        }
        ClienteAction::Edit {
            id,
            client_id,
            nome,
            cnpj,
            ativo,
        } => {
            let Some(cliente) = screen.clientes().iter().find(|c| c.id == id).cloned() else {
                eprintln!("Cliente {id} não encontrado.");
                return Ok(());
            };
            screen.start_edit(cliente);
            if let Some(client_id) = client_id {
                screen.form.client_id = client_id;
            }
            if let Some(nome) = nome {
                screen.form.nome_empresa = nome;
            }
            if let Some(cnpj) = cnpj {
                screen.form.cnpj_empresa = cnpj;
                screen.apply_cnpj_mask();
            }
            if let Some(ativo) = ativo {
                screen.form.ativo = ativo;
            }
            screen.submit().await;
            report_validation(screen.touched(), screen.invalid_fields());
        }
        ClienteAction::Delete { id } => {
            let Some(cliente) = screen.clientes().iter().find(|c| c.id == id).cloned() else {
                eprintln!("Cliente {id} não encontrado.");
                return Ok(());
            };
            screen.delete(cliente).await;
        }
    }
    Ok(())
}
