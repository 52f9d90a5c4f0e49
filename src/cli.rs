use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "shield", version, about = "CyberShield client")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "CYBERSHIELD_GATEWAY",
        help = "Gateway base URL (overrides config.toml)"
    )]
    pub gateway: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account on the gateway
    Register {
        #[command(subcommand)]
        scope: RegisterCommands,
    },
    /// Sign in and keep the session for later commands
    Login { email: String },
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Submit a URL for a security scan
    Scan { url: String },
    /// Check that the gateway is up
    Status,
    /// Interactive session with navigable views
    Shell,
}

#[derive(Subcommand, Debug)]
pub enum RegisterCommands {
    Individual(IndividualArgs),
    Enterprise(EnterpriseArgs),
}

#[derive(Args, Debug)]
pub struct IndividualArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub mobile: String,
}

#[derive(Args, Debug)]
pub struct EnterpriseArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub company_name: String,
    #[arg(long)]
    pub company_website: String,
    #[arg(long)]
    pub phone: String,
}
