use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pennywise::auth::Session;
use pennywise::cli::{
    handle_add_command, handle_audit_command, handle_budget_command, handle_history_command,
    handle_label_command, handle_login_command, handle_logout_command,
    handle_transaction_command, handle_warning_command, handle_whoami_command, AddArgs,
    BudgetCommands, LabelCommands, TransactionCommands, WarningCommands,
};
use pennywise::config::{paths::PennywisePaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "pennywise",
    version,
    about = "Keypad-first monthly spending tracker",
    long_about = "Pennywise tracks what you spend against a monthly budget. Type an \
                  amount on the calculator keypad, pick a label, and watch the budget \
                  header turn yellow and then red as the month's money runs out."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive keypad
    #[command(alias = "ui")]
    Tui,

    /// Sign in as a user, creating their data on first use
    Login {
        /// User name
        user: String,
    },

    /// Sign out the current user
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Record spending from keypad keys
    Add(AddArgs),

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Warning threshold commands
    #[command(subcommand)]
    Warning(WarningCommands),

    /// Transaction type commands
    #[command(subcommand)]
    Label(LabelCommands),

    /// Spending by month, or one month in detail
    History {
        /// Month to show (YYYY-MM)
        month: Option<String>,
    },

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Create the data directories and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(paths: &PennywisePaths) {
    let filter = EnvFilter::try_from_env("PENNYWISE_LOG").unwrap_or_else(|_| {
        let directive = Settings::load_or_create(paths)
            .map(|s| s.log_filter)
            .unwrap_or_else(|_| "warn".to_string());
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PennywisePaths::new()?;
    init_logging(&paths);

    let mut session = Session::restore(paths.clone())?;

    match cli.command {
        Some(Commands::Tui) => {
            let storage = session.open_storage()?;
            pennywise::tui::run_tui(&storage, session.settings())?;
        }
        Some(Commands::Login { user }) => {
            handle_login_command(&mut session, &user)?;
        }
        Some(Commands::Logout) => {
            handle_logout_command(&mut session)?;
        }
        Some(Commands::Whoami) => {
            handle_whoami_command(&session)?;
        }
        Some(Commands::Add(args)) => {
            let storage = session.open_storage()?;
            handle_add_command(&storage, args)?;
        }
        Some(Commands::Txn(cmd)) => {
            let storage = session.open_storage()?;
            handle_transaction_command(&storage, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            let storage = session.open_storage()?;
            handle_budget_command(&storage, cmd)?;
        }
        Some(Commands::Warning(cmd)) => {
            let storage = session.open_storage()?;
            handle_warning_command(&storage, cmd)?;
        }
        Some(Commands::Label(cmd)) => {
            let storage = session.open_storage()?;
            handle_label_command(&storage, cmd)?;
        }
        Some(Commands::History { month }) => {
            let storage = session.open_storage()?;
            handle_history_command(&storage, month)?;
        }
        Some(Commands::Audit { limit }) => {
            let storage = session.open_storage()?;
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Init) => {
            println!("Initializing Pennywise at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            session.settings().save(&paths)?;
            if session.is_signed_in() {
                let storage = session.open_storage()?;
                println!("User data ready at: {}", storage.paths().root().display());
            } else {
                println!("Run 'pennywise login <user>' to start tracking.");
            }
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            let settings = session.settings();
            println!("Pennywise Configuration");
            println!("=======================");
            println!("Data directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!(
                "  Active user:     {}",
                settings.active_user.as_deref().unwrap_or("(none)")
            );
            println!("  Long press (ms): {}", settings.long_press_ms);
            println!("  Log filter:      {}", settings.log_filter);
        }
        None => {
            println!("Pennywise - keypad-first spending tracker");
            println!();
            println!("Run 'pennywise --help' for usage information.");
            println!("Run 'pennywise tui' to launch the interactive keypad.");
        }
    }

    Ok(())
}
