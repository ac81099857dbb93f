use std::io::Write;

use patient_records_client::console::{Command, HELP, is_confirmation};
use patient_records_client::{
    ApiClient, ApiClientMetrics, ClientConfig, Controller, MetricsConfig, TelemetryConfig,
    init_tracing,
};
use prometheus::Registry;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing(&TelemetryConfig::from_env())?;

    let config = ClientConfig::from_env();
    let metrics_config = MetricsConfig::from_env();
    let registry = Registry::new();
    let metrics = if metrics_config.enabled {
        Some(ApiClientMetrics::new(&registry, &metrics_config)?)
    } else {
        None
    };

    let api = ApiClient::new(config, metrics)?;
    info!(base_url = %api.base_url(), "Patient records client ready");
    let mut controller = Controller::new(api);

    println!("Patient records client. Type 'help' for commands.");
    print_screen(&controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt("> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Elements => println!("{}", controller.bindings().elements().join("\n")),
            Command::Dismiss => {
                controller.dismiss_notification();
                print_screen(&controller);
            }
            Command::Show => print_screen(&controller),
            Command::Set { field, value } => controller.inputs_mut().set(&field, value),
            Command::Event(event) => {
                // Failures are already on screen as a notification
                let _ = controller.handle(event).await;
                print_screen(&controller);
            }
            Command::Confirm { prompt: question, event } => {
                prompt(&format!("{question} [y/N] "))?;
                let answer = lines.next_line().await?.unwrap_or_default();
                if is_confirmation(&answer) {
                    let _ = controller.handle(event).await;
                    print_screen(&controller);
                } else {
                    println!("Cancelled");
                }
            }
        }
    }

    if controller.session().is_authenticated() {
        warn!("Exiting with an active session; signing out");
        controller.logout().await;
    }

    Ok(())
}

fn prompt(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{text}")?;
    stdout.flush()
}

fn print_screen(controller: &Controller) {
    println!("{}", controller.render_text());
}
