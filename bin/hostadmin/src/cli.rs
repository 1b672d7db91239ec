use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "hostadmin", version, about = "Hosting admin back office: refunds and transfers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List refunds, newest first
    Refunds {
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Free-text filter (reference, account name, ...)
        #[arg(long)]
        search: Option<String>,
    },

    /// List banks a refund can be paid into
    Banks,

    /// List recent transactions
    Transactions {
        #[arg(long, default_value_t = 20)]
        limit: u32,

        /// Only show successful transactions without a refund
        #[arg(long)]
        refundable: bool,
    },

    /// Initiate a refund and confirm its transfer
    Refund(RefundArgs),
}

#[derive(Debug, Args)]
pub struct RefundArgs {
    /// Reference of the transaction being refunded
    #[arg(long)]
    pub reference: String,

    /// Amount in naira, at least 100
    #[arg(long)]
    pub amount: i64,

    #[arg(long)]
    pub bank_code: String,

    #[arg(long)]
    pub account_number: String,

    /// Admin password for the transfer step; prompted for when absent
    #[arg(long, env = "HOSTADMIN_TRANSFER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}
