use crate::cli::{Command, RefundArgs};
use crate::utility::tasks::prompt_line;
use eyre::{eyre, Report};
use hostadmin_core::services::bank_service::BankService;
use hostadmin_core::services::refund_list::RefundList;
use hostadmin_core::services::transaction_service::TransactionService;
use hostadmin_core::{AdminSession, RefundWorkflow};
use hostadmin_primitives::models::dtos::TransactionQuery;
use hostadmin_primitives::models::entities::{RefundPage, Transaction};
use hostadmin_primitives::models::AppConfig;
use secrecy::SecretString;

pub async fn execute(
    command: Command,
    session: &AdminSession,
    config: &AppConfig,
) -> Result<(), Report> {
    match command {
        Command::Refunds { page, search } => {
            let mut refunds = RefundList::new(config.refund_list.clone());
            let page = refunds.load(session, page, search.as_deref()).await?;
            print_refunds(page);
        }
        Command::Banks => {
            for bank in BankService::list_banks(session).await? {
                println!("{:<8} {}", bank.code, bank.name);
            }
        }
        Command::Transactions { limit, refundable } => {
            let query = TransactionQuery {
                per_page: limit,
                ..TransactionQuery::default()
            };
            let transactions = TransactionService::recent(session, &query).await?;

            if refundable {
                let mut refunds = RefundList::new(config.refund_list.clone());
                refunds.refresh(session).await?;
                for tx in TransactionService::refundable(&transactions, refunds.page()) {
                    print_transaction(tx);
                }
            } else {
                transactions.iter().for_each(print_transaction);
            }
        }
        Command::Refund(args) => refund(args, session, config).await?,
    }
    Ok(())
}

async fn refund(args: RefundArgs, session: &AdminSession, config: &AppConfig) -> Result<(), Report> {
    let mut workflow = RefundWorkflow::new(session.clone(), config.refund_list.clone());

    // Load refunds for this transaction so the duplicate guard has something
    // to check against.
    workflow.load_refunds(1, Some(&args.reference)).await?;

    workflow.open_initiate(&args.reference);
    workflow.set_amount(args.amount)?;
    workflow.set_bank_code(&args.bank_code)?;
    workflow.set_account_number(&args.account_number)?;

    if let Some(verified) = workflow.settle_verification().await {
        let account_name = verified?;
        println!("Account name: {account_name}");
    }

    let handle = workflow.submit_refund().await?;
    println!(
        "Refund {} initiated: ₦{} to {} ({})",
        handle.reference,
        handle.amount,
        handle.destination_account_name,
        handle.destination_account_number
    );

    let password = match args.password {
        Some(password) => password,
        None => prompt_line("Admin password: ").await?,
    };
    if password.is_empty() {
        workflow.close();
        return Err(eyre!("Transfer cancelled: no password given"));
    }

    workflow.set_transfer_password(SecretString::from(password))?;
    let handle = workflow.confirm_transfer().await?;
    println!("Transfer completed for refund {}", handle.reference);

    Ok(())
}

fn print_refunds(page: &RefundPage) {
    println!(
        "{:<20} {:>12} {:<11} {:<20} {}",
        "REFERENCE", "AMOUNT", "STATUS", "TRANSACTION", "ACCOUNT"
    );
    for refund in &page.items {
        println!(
            "{:<20} {:>12} {:<11} {:<20} {}",
            refund.reference,
            refund.amount,
            refund.status,
            refund.source_reference().unwrap_or("-"),
            refund.account_name.as_deref().unwrap_or("-"),
        );
    }
    println!(
        "page {} of {} ({} refunds)",
        page.page_number, page.total_pages, page.total_items
    );
    if page.has_next() {
        println!("more: --page {}", page.page_number + 1);
    }
}

fn print_transaction(tx: &Transaction) {
    println!(
        "{:<20} {:>12} {:<10} {}",
        tx.reference,
        tx.amount,
        tx.status,
        tx.customer_email.as_deref().unwrap_or("-"),
    );
}
