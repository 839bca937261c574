//! Bank CLI - a small flat-file bank in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{admin, dashboard, delete, history, login, money, register, settings};

/// Bank - open an account, move money, check your history
#[derive(Parser)]
#[command(name = "bank", version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug); BANK_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a new account (prompts for anything not given)
    Register {
        #[arg(long)]
        name: Option<String>,
        /// Date of birth, YYYY-MM-DD
        #[arg(long)]
        dob: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        pin: Option<String>,
        #[arg(long)]
        confirm_pin: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in to an account
    Login {
        /// 14-digit account number
        account_number: String,
        #[arg(long)]
        pin: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show the logged-in account
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Deposit money into the logged-in account
    Deposit {
        amount: String,
    },

    /// Withdraw money from the logged-in account
    Withdraw {
        amount: String,
    },

    /// Send money to another account
    Transfer {
        /// Receiver's account number
        target: String,
        amount: String,
    },

    /// Show transaction history, newest first
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an account and its history
    Delete {
        account_number: String,
        #[arg(long)]
        pin: Option<String>,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// List all accounts and the bank's total balance
    Admin {
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show settings, or change them with the admin password
    Settings {
        /// Current admin password
        #[arg(long)]
        password: Option<String>,
        /// How new PINs are stored: plaintext or argon2
        #[arg(long)]
        pin_scheme: Option<String>,
        /// Minimum age to open an account
        #[arg(long)]
        minimum_age: Option<u32>,
        /// Replace the admin password
        #[arg(long)]
        new_admin_password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    bank_core::logging::init(cli.verbose);

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<bank_core::Error>() {
                Some(core) => output::error(&output::sentence(&core.reason())),
                None => output::error(&format!("{:#}", e)),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register { name, dob, gender, phone, email, username, pin, confirm_pin, json } => {
            register::run(
                register::RegisterArgs { name, dob, gender, phone, email, username, pin, confirm_pin },
                json,
            )
        }
        Commands::Login { account_number, pin } => login::run(&account_number, pin),
        Commands::Logout => login::run_logout(),
        Commands::Dashboard { json } => dashboard::run(json),
        Commands::Deposit { amount } => money::run_deposit(&amount),
        Commands::Withdraw { amount } => money::run_withdraw(&amount),
        Commands::Transfer { target, amount } => money::run_transfer(&target, &amount),
        Commands::History { json } => history::run(json),
        Commands::Delete { account_number, pin, force } => delete::run(&account_number, pin, force),
        Commands::Admin { password, json } => admin::run(password, json),
        Commands::Settings { password, pin_scheme, minimum_age, new_admin_password, json } => {
            settings::run(password, pin_scheme, minimum_age, new_admin_password, json)
        }
    }
}
