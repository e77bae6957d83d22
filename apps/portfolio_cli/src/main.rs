use std::{
    io::{self, Write},
    time::Duration,
};

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use client_core::ContactClient;
use tracing::info;
use typewriter::{presets::Preset, TypingOptions, TypingSession, TypingSnapshot};

#[derive(Parser, Debug)]
#[command(about = "Terminal front for the portfolio: typing animations and the contact form")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a typing animation in the terminal
    Type(TypeArgs),
    /// Submit the contact form to a running server
    Contact {
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        server_url: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    Hero,
    Contact,
}

impl From<PresetArg> for Preset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Hero => Preset::Hero,
            PresetArg::Contact => Preset::Contact,
        }
    }
}

#[derive(Args, Debug)]
struct TypeArgs {
    /// Phrase to type; repeat for several. Overrides --preset.
    #[arg(long = "phrase")]
    phrases: Vec<String>,
    #[arg(long, value_enum, default_value_t = PresetArg::Hero)]
    preset: PresetArg,
    #[arg(long)]
    speed_ms: Option<u64>,
    #[arg(long)]
    hold_ms: Option<u64>,
    #[arg(long)]
    start_delay_ms: Option<u64>,
    #[arg(long)]
    no_loop: bool,
    /// Stop a looping animation after this many seconds
    #[arg(long, default_value_t = 15)]
    duration_secs: u64,
    /// Print every state change as a JSON line instead of redrawing
    #[arg(long)]
    json: bool,
}

impl TypeArgs {
    fn phrases(&self) -> Vec<String> {
        if self.phrases.is_empty() {
            Preset::from(self.preset)
                .phrases()
                .iter()
                .map(|phrase| phrase.to_string())
                .collect()
        } else {
            self.phrases.clone()
        }
    }

    fn options(&self) -> TypingOptions {
        let mut options = if self.phrases.is_empty() {
            Preset::from(self.preset).options()
        } else {
            TypingOptions::default()
        };
        if let Some(ms) = self.speed_ms {
            options = options.with_speed(Duration::from_millis(ms));
        }
        if let Some(ms) = self.hold_ms {
            options = options.with_hold_delay(Duration::from_millis(ms));
        }
        if let Some(ms) = self.start_delay_ms {
            options = options.with_start_delay(Duration::from_millis(ms));
        }
        if self.no_loop {
            options = options.with_loop(false);
        }
        options
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Type(args) => play(args).await,
        Command::Contact {
            server_url,
            name,
            email,
            message,
        } => {
            let client = ContactClient::new(&server_url)?;
            info!(endpoint = %client.endpoint(), "submitting contact form");
            let ack = client.send(&name, &email, &message).await?;
            if !ack.success {
                bail!("server did not accept the message: {}", ack.message);
            }
            println!("{}", ack.message);
            Ok(())
        }
    }
}

async fn play(args: TypeArgs) -> Result<()> {
    let mut session = TypingSession::start(args.phrases(), args.options());
    let mut updates = session.subscribe();
    let deadline = tokio::time::sleep(Duration::from_secs(args.duration_secs));
    tokio::pin!(deadline);

    let mut stdout = io::stdout();
    render(&mut stdout, &updates.borrow_and_update(), args.json)?;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                render(&mut stdout, &snapshot, args.json)?;
            }
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.stop();
    if !args.json {
        writeln!(stdout)?;
    }
    Ok(())
}

fn render(out: &mut impl Write, snapshot: &TypingSnapshot, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(snapshot)?)?;
    } else {
        write!(out, "\r\x1b[2K{}\u{258C}", snapshot.text)?;
    }
    out.flush()?;
    Ok(())
}
