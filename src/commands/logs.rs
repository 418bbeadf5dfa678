use crate::cli::LogsArgs;
use crate::commands::console_notifier;
use backup_console::errors::Result;
use backup_console::format::{format_file_size, truncate_error_message};
use backup_console::gateway::{Rest, backup_logs};
use backup_console::models::BackupLog;
use backup_console::screens::LogsScreen;

fn print_log_row(log: &BackupLog, client_name: &str) {
    println!(
        "{}  {:<24} {:<32} {:>10}  {}",
        log.created_at.format("%Y-%m-%d %H:%M"),
        client_name,
        log.file_name,
        format_file_size(log.file_size_bytes),
        truncate_error_message(log.error_message.as_deref()),
    );
}

pub async fn run(rest: Rest, args: LogsArgs) -> Result<()> {
    // Scoped to one client: read-only page straight from the gateway
    if let Some(client_id) = &args.cliente {
        let page =
            backup_logs::list_backup_logs(&rest, client_id, args.pagina, args.tamanho).await?;
        if page.rows.is_empty() {
            println!("Nenhum log encontrado.");
        }
        for log in &page.rows {
            print_log_row(log, client_id);
        }
        println!(
            "Página {} ({} registros no total)",
            args.pagina + 1,
            page.total
        );
        return Ok(());
    }

    let mut screen = LogsScreen::new(rest, console_notifier());
    screen.activate().await;
    if let Some(filtro) = &args.filtro {
        screen.set_filter(filtro).await;
    }
    screen.handle_page(args.pagina, args.tamanho).await;

    if screen.logs().is_empty() {
        println!("Nenhum log encontrado.");
    }
    let rows: Vec<(BackupLog, String)> = screen
        .logs()
        .iter()
        .map(|log| (log.clone(), screen.client_name(&log.client_id)))
        .collect();
    for (log, client_name) in &rows {
        print_log_row(log, client_name);
    }
    println!(
        "Página {} ({} registros no total)",
        screen.page_index() + 1,
        screen.total()
    );
    Ok(())
}
