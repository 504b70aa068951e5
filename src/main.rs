use clap::Parser;
use hotel_dd::utils::{logger, validation::Validate};
use hotel_dd::{CliConfig, ContactMessage, ContactService, HttpMailChannel};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting hotel-dd mailer");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let api_key = match config.resolved_api_key() {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let channel = HttpMailChannel::new(&config.mail_endpoint, api_key, &config.sender_email)
        .with_timeout(Duration::from_secs(120));
    let service = ContactService::from_config(channel, &config);

    // 寄一封測試訊息確認郵件通道設定正確
    let message = ContactMessage {
        name: "Mailer smoke test".to_string(),
        email: config.sender_email.clone(),
        message: "Test message from the hotel-dd mailer CLI.".to_string(),
    };

    match service.send(&message).await {
        Ok(result) => {
            tracing::info!(
                "✅ Test notification delivered in {} attempt(s)",
                result.attempt_count()
            );
            println!("✅ Test notification delivered! Check the front desk inbox.");
        }
        Err(e) => {
            tracing::error!("❌ Test notification failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
