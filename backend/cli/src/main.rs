mod extensions;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crosscog_core::{Bot, Side};
use crosscog_subcommands::{ManagerOptions, SubcommandManager};

#[derive(Parser)]
#[command(name = "crosscog")]
#[command(about = "crosscog — cross-cog subcommand registration demo bot")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the demo cogs (subcommands before their groups) and print the
    /// reconciled command tree
    Demo {
        /// Search groups across both universes; cross-universe name
        /// matches then fail loudly instead of staying pending
        #[arg(long)]
        strict: bool,
        /// Skip a named cog to watch the unresolved report fire
        #[arg(long)]
        skip: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Demo { strict, skip } => run_demo(strict, skip).await,
    }
}

async fn run_demo(strict: bool, skip: Option<String>) -> Result<()> {
    let mut bot = Bot::new();
    let manager = SubcommandManager::install(
        &mut bot,
        ManagerOptions {
            copy_group_error_handler: true,
            check_group_universe: strict,
        },
    )?;

    // Subcommand cogs load before the cogs declaring their groups; the
    // manager reconciles as the groups arrive.
    let cogs = vec![
        extensions::prefix::utilities()?,
        extensions::prefix::user_info()?,
        extensions::hybrid::channel_commands()?,
        extensions::hybrid::channel_utils()?,
        extensions::slash::server_commands()?,
        extensions::slash::settings_commands()?,
        extensions::prefix::groups()?,
        extensions::hybrid::groups()?,
        extensions::slash::groups()?,
    ];
    for cog in cogs {
        let name = cog.name().to_string();
        if skip.as_deref() == Some(name.as_str()) {
            info!("skipping cog {name}");
            continue;
        }
        bot.add_cog(cog).await?;
        info!("loaded cog {name}");
    }

    // Startup-failure semantics: anything still unresolved aborts the run.
    manager.report_unresolved(&bot).await?;

    print_tree(&bot);
    Ok(())
}

fn print_tree(bot: &Bot) {
    for (label, side) in [("prefix/hybrid", Side::Prefix), ("slash", Side::Slash)] {
        println!("{label} commands:");
        for id in bot.tree().walk(side) {
            let Some(node) = bot.tree().node(id) else { continue };
            let mut depth = 0;
            let mut current = node.parent();
            while let Some(parent) = current {
                depth += 1;
                current = bot.tree().node(parent).and_then(|n| n.parent());
            }
            println!(
                "{}{} ({}, cog {})",
                "  ".repeat(depth + 1),
                node.name,
                node.universe,
                node.cog
            );
        }
    }
}
