use argh::FromArgs;
use chrono::NaiveDate;
use inventory_tracker::Interpreter;
use inventory_tracker::env::{Environment, ShellConfig};
use inventory_tracker::{fields, logging};

#[derive(FromArgs)]
/// Interactive in-memory inventory tracker.
struct Args {
    #[argh(option, default = "String::from(\"$\")")]
    /// currency symbol printed before amounts.
    currency: String,

    #[argh(option, from_str_fn(fields::date_arg))]
    /// reference date for expiry reports (dd/mm/yyyy or yyyy-mm-dd); defaults to today.
    today: Option<NaiveDate>,

    #[argh(switch, short = 'v')]
    /// log debug events to stderr when RUST_LOG is not set.
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    logging::init(if args.verbose { "debug" } else { "warn" });

    let env = Environment::with_config(ShellConfig {
        currency_symbol: args.currency,
        today: args.today,
    });
    let mut sh = Interpreter::with_environment(env);

    println!("Inventory tracker. Type 'help' for the list of commands.");
    sh.repl()
        .map_err(|e| anyhow::anyhow!("terminal error: {}", e))?;
    Ok(())
}
