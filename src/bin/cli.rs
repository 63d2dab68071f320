use anyhow::{anyhow, Context};
use blocadamia_client::{
    client::{FullnodeClient, Network},
    payload, qr,
    submit::{LOAN_MEMO, PAYMENT_MEMO},
    units, validate, BudgetAllocation,
};
use clap::{Arg, ArgMatches, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let matches = Command::new("blocadamia-cli")
        .version(blocadamia_client::VERSION)
        .about("Blocadamia campus finance: build payment, loan and budget transactions and read account state")
        .subcommand(
            Command::new("pay")
                .about("Build a payment transaction for your wallet to sign")
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Recipient address (0x..., 66 characters)")
                        .required(true),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .help("Amount in APT")
                        .required(true),
                )
                .arg(
                    Arg::new("memo")
                        .long("memo")
                        .help("Payment memo")
                        .default_value(PAYMENT_MEMO),
                ),
        )
        .subcommand(
            Command::new("loan")
                .about("Student loan operations")
                .subcommand(
                    Command::new("request")
                        .about("Build a loan request transaction")
                        .arg(
                            Arg::new("borrower")
                                .long("borrower")
                                .help("Borrower address")
                                .required(true),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .help("Loan principal in APT")
                                .required(true),
                        )
                        .arg(
                            Arg::new("rate")
                                .long("rate")
                                .help("Interest rate in percent")
                                .default_value("5"),
                        )
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .help("Loan duration in days")
                                .default_value("30"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List active loans for an account")
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .help("Borrower address")
                                .required(true),
                        )
                        .arg(
                            Arg::new("network")
                                .long("network")
                                .help("Network to read from (mainnet, testnet, devnet)")
                                .default_value("testnet"),
                        ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Budget planner operations")
                .subcommand(
                    Command::new("set")
                        .about("Build a budget update transaction")
                        .arg(Arg::new("owner").long("owner").help("Account address").required(true))
                        .arg(Arg::new("food").long("food").help("Food %").default_value("30"))
                        .arg(Arg::new("rent").long("rent").help("Rent %").default_value("40"))
                        .arg(Arg::new("travel").long("travel").help("Travel %").default_value("10"))
                        .arg(
                            Arg::new("entertainment")
                                .long("entertainment")
                                .help("Entertainment %")
                                .default_value("10"),
                        )
                        .arg(
                            Arg::new("education")
                                .long("education")
                                .help("Education %")
                                .default_value("5"),
                        )
                        .arg(Arg::new("other").long("other").help("Other %").default_value("5"))
                        .arg(
                            Arg::new("total")
                                .long("total")
                                .help("Total budget in APT")
                                .default_value("1000"),
                        ),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show the on-chain budget allocation for an account")
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .help("Account address")
                                .required(true),
                        )
                        .arg(
                            Arg::new("network")
                                .long("network")
                                .help("Network to read from (mainnet, testnet, devnet)")
                                .default_value("testnet"),
                        ),
                ),
        )
        .subcommand(
            Command::new("qr")
                .about("Payment QR codes")
                .subcommand(
                    Command::new("encode")
                        .about("Encode a payment intent as QR text")
                        .arg(
                            Arg::new("address")
                                .long("address")
                                .help("Payee address")
                                .required(true),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .help("Requested amount in APT")
                                .required(true),
                        ),
                )
                .subcommand(
                    Command::new("decode")
                        .about("Decode scanned QR text")
                        .arg(Arg::new("text").long("text").help("Scanned text").required(true)),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("pay", pay_matches)) => handle_pay(pay_matches),
        Some(("loan", loan_matches)) => handle_loan_commands(loan_matches).await,
        Some(("budget", budget_matches)) => handle_budget_commands(budget_matches).await,
        Some(("qr", qr_matches)) => handle_qr_commands(qr_matches),
        _ => {
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

/// Print a payload for an external wallet to sign and submit.
fn emit_payload(payload: &payload::EntryFunctionPayload) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    eprintln!("Hand this payload to your wallet to sign and submit.");
    Ok(())
}

fn handle_pay(matches: &ArgMatches) -> anyhow::Result<()> {
    let recipient = matches.get_one::<String>("to").unwrap();
    let amount = matches.get_one::<String>("amount").unwrap();
    let memo = matches.get_one::<String>("memo").unwrap();

    validate::validate_address(recipient)?;
    validate::validate_amount(amount)?;
    let octas = units::to_octas(amount)?;

    tracing::info!(recipient = %recipient, amount = %amount, octas = %octas, "building payment");
    emit_payload(&payload::make_payment(recipient, &octas, memo))
}

async fn handle_loan_commands(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("request", request_matches)) => {
            let borrower = request_matches.get_one::<String>("borrower").unwrap();
            let amount = request_matches.get_one::<String>("amount").unwrap();
            let rate = request_matches.get_one::<String>("rate").unwrap();
            let days = request_matches.get_one::<String>("days").unwrap();

            validate::validate_address(borrower)?;
            let amount = validate::validate_amount(amount)?;
            let rate: f64 = rate.parse().context("--rate must be a percentage")?;
            let days: u64 = days.parse().context("--days must be a whole number of days")?;

            emit_payload(&payload::request_loan(
                borrower,
                amount.trunc() as u64,
                units::to_basis_points(rate),
                days,
                LOAN_MEMO,
            ))
        }
        Some(("list", list_matches)) => {
            let account = list_matches.get_one::<String>("account").unwrap();
            let network = Network::parse(list_matches.get_one::<String>("network").unwrap());
            validate::validate_address(account)?;

            let client = FullnodeClient::new(network);
            let loans = client.get_user_loans_as_borrower(account).await?;
            if loans.is_empty() {
                println!("No active loans");
                return Ok(());
            }
            for loan in loans {
                println!(
                    "#{}  {} APT at {}% over {} days  [{}]",
                    loan.id,
                    loan.amount,
                    loan.interest_percent(),
                    loan.duration_days,
                    loan.status
                );
            }
            Ok(())
        }
        _ => Err(anyhow!("use `loan request` or `loan list`")),
    }
}

async fn handle_budget_commands(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("set", set_matches)) => {
            let owner = set_matches.get_one::<String>("owner").unwrap();
            validate::validate_address(owner)?;

            let percent = |name: &str| -> anyhow::Result<u64> {
                set_matches
                    .get_one::<String>(name)
                    .unwrap()
                    .parse()
                    .with_context(|| format!("--{name} must be a whole number"))
            };
            let budget = BudgetAllocation {
                food: percent("food")?,
                rent: percent("rent")?,
                travel: percent("travel")?,
                entertainment: percent("entertainment")?,
                education: percent("education")?,
                other: percent("other")?,
                total: percent("total")?,
            };

            let total = budget.allocation_total();
            if total != 100 {
                // Displayed, never enforced.
                eprintln!("Warning: allocation sums to {total}%");
            }
            emit_payload(&payload::update_budget(owner, &budget))
        }
        Some(("show", show_matches)) => {
            let account = show_matches.get_one::<String>("account").unwrap();
            let network = Network::parse(show_matches.get_one::<String>("network").unwrap());
            validate::validate_address(account)?;

            let client = FullnodeClient::new(network);
            let profile = client.get_user_profile(account).await?;
            let budget = profile.budget.unwrap_or_default();

            println!("Food:          {}%", budget.food);
            println!("Rent:          {}%", budget.rent);
            println!("Travel:        {}%", budget.travel);
            println!("Entertainment: {}%", budget.entertainment);
            println!("Education:     {}%", budget.education);
            println!("Other:         {}%", budget.other);
            println!("Total budget:  {} APT", budget.total);
            println!("Allocated:     {}%", budget.allocation_total());
            Ok(())
        }
        _ => Err(anyhow!("use `budget set` or `budget show`")),
    }
}

fn handle_qr_commands(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("encode", encode_matches)) => {
            let intent = qr::PaymentIntent {
                address: encode_matches.get_one::<String>("address").unwrap().clone(),
                amount: encode_matches.get_one::<String>("amount").unwrap().clone(),
            };
            println!("{}", qr::encode(&intent)?);
            Ok(())
        }
        Some(("decode", decode_matches)) => {
            let text = decode_matches.get_one::<String>("text").unwrap();
            let scanned = qr::decode(text)?;
            match scanned.address {
                Some(address) => println!("Address: {address}"),
                None => println!("Address: (not present)"),
            }
            match scanned.amount {
                Some(amount) => println!("Amount:  {amount}"),
                None => println!("Amount:  (not present)"),
            }
            Ok(())
        }
        _ => Err(anyhow!("use `qr encode` or `qr decode`")),
    }
}
