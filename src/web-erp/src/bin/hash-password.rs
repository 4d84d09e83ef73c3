use clap::Parser;

use web_erp::auth::UserRecord;

/// Create a user record for the JSON array in AUTH_USERS_FILE.
#[derive(Parser)]
#[command(name = "hash-password")]
#[command(about = "Hash a password into a College-ERP user record", long_about = None)]
struct Cli {
    /// Username to sign in with.
    username: String,
    /// Plain text password; only its bcrypt hash is printed.
    password: String,
    /// Allow the account into the admin site.
    #[arg(long)]
    staff: bool,
    /// Create the account disabled.
    #[arg(long)]
    inactive: bool,
    /// bcrypt work factor.
    #[arg(long, default_value_t = bcrypt::DEFAULT_COST)]
    cost: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut record = UserRecord::new(&cli.username, &cli.password, cli.cost)?;
    record.is_staff = cli.staff;
    record.is_active = !cli.inactive;

    println!("{}", serde_json::to_string_pretty(&record)?);
    eprintln!("Add this record to the JSON array in the file named by AUTH_USERS_FILE.");
    Ok(())
}
