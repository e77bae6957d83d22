use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::domain::StoredContactMessage;
use storage::Storage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/portfolio.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the most recent contact messages
    ListMessages {
        #[arg(long, default_value_t = 20)]
        limit: u32,
        #[arg(long)]
        json: bool,
    },
    CountMessages,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let storage = Storage::open_existing(&cli.database_url)
        .await
        .with_context(|| format!("cannot open {}", cli.database_url))?;

    match cli.command {
        Command::ListMessages { limit, json } => {
            for message in storage.list_contact_messages(limit).await? {
                if json {
                    println!("{}", serde_json::to_string(&message)?);
                } else {
                    println!("{}", summary_line(&message));
                }
            }
        }
        Command::CountMessages => {
            println!("contact_messages={}", storage.count_contact_messages().await?);
        }
    }

    Ok(())
}

fn summary_line(message: &StoredContactMessage) -> String {
    let preview: String = message.message.chars().take(60).collect();
    let ellipsis = if message.message.chars().count() > 60 {
        "..."
    } else {
        ""
    };
    format!(
        "#{} {} {} <{}> {}{}",
        message.contact_id.0,
        message.timestamp.to_rfc3339(),
        message.name,
        message.email,
        preview.replace('\n', " "),
        ellipsis
    )
}
