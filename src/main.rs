use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use paymee::application::notification::NotificationHandler;
use paymee::domain::acquirer::{AcquirerConfig, TransactionValues};
use paymee::domain::notification::NotificationPayload;
use paymee::domain::transaction::{Currency, PaymentTransaction};
use paymee::infrastructure::in_memory::InMemoryTransactionRepository;
use paymee::interfaces::csv::transaction_reader::TransactionReader;
use paymee::interfaces::csv::transaction_writer::TransactionWriter;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the Paymee request payload for a new payment as JSON
    Request {
        /// Acquirer settings (JSON with `api_key` and optional `base_url`)
        #[arg(long)]
        config: PathBuf,

        /// Base URL of the host, used when the acquirer has no override
        #[arg(long)]
        host_url: String,

        #[arg(long)]
        reference: String,

        /// Amount in currency units, e.g. 10.5
        #[arg(long)]
        amount: Decimal,

        #[arg(long)]
        currency: String,

        /// Customer email
        #[arg(long)]
        email: Option<String>,
    },
    /// Apply a Paymee notification to a set of transaction records
    Notify {
        /// Transaction records CSV file
        #[arg(long)]
        transactions: PathBuf,

        /// Notification payload (JSON)
        #[arg(long)]
        payload: PathBuf,

        /// Path to persistent database (optional). If provided, uses RocksDB.
        #[cfg(feature = "storage-rocksdb")]
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Request {
            config,
            host_url,
            reference,
            amount,
            currency,
            email,
        } => {
            let file = File::open(config).into_diagnostic()?;
            let config = AcquirerConfig::from_reader(file)?;
            let values = TransactionValues {
                reference,
                amount,
                currency: Currency::new(currency),
                partner_email: email,
                extra: Default::default(),
            };

            let payload = config.build_request_payload(&values, &host_url)?;
            serde_json::to_writer_pretty(io::stdout().lock(), &payload).into_diagnostic()?;
            println!();
            Ok(())
        }
        Command::Notify {
            transactions,
            payload,
            #[cfg(feature = "storage-rocksdb")]
            db_path,
        } => {
            let records = read_transactions(transactions)?;
            let payload: NotificationPayload =
                serde_json::from_reader(File::open(payload).into_diagnostic()?).into_diagnostic()?;

            #[cfg(feature = "storage-rocksdb")]
            if let Some(db_path) = db_path {
                use paymee::infrastructure::rocksdb::RocksDbTransactionRepository;

                let repo = RocksDbTransactionRepository::open(db_path)?;
                for tx in &records {
                    repo.insert(tx)?;
                }
                process(&NotificationHandler::new(Box::new(repo.clone())), &payload).await?;
                return write_transactions(repo.all()?);
            }

            let repo = InMemoryTransactionRepository::new();
            for tx in records {
                repo.insert(tx).await;
            }
            process(&NotificationHandler::new(Box::new(repo.clone())), &payload).await?;
            write_transactions(repo.all().await)
        }
    }
}

fn read_transactions(path: PathBuf) -> Result<Vec<PaymentTransaction>> {
    let file = File::open(path).into_diagnostic()?;
    let mut records = Vec::new();
    for tx_result in TransactionReader::new(file).transactions() {
        match tx_result {
            Ok(tx) => records.push(tx),
            Err(e) => error!("Error reading transaction: {}", e),
        }
    }
    Ok(records)
}

async fn process(handler: &NotificationHandler, payload: &NotificationPayload) -> Result<()> {
    let outcome = handler.process_notification(payload).await.inspect_err(|e| {
        error!("Error processing notification: {}", e);
    })?;

    for param in outcome.invalid_parameters {
        eprintln!(
            "Invalid parameter {}: received {:?}, expected {}",
            param.field, param.received, param.expected
        );
    }
    Ok(())
}

fn write_transactions(transactions: Vec<PaymentTransaction>) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = TransactionWriter::new(stdout.lock());
    writer.write_transactions(transactions)?;
    Ok(())
}
