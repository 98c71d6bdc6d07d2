use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::env::Environment;
use crate::fields::{self, date_arg, days_arg, price_arg, quantity_arg};
use crate::interpreter::Factory;
use crate::product::Product;
use anyhow::{Result, bail};
use argh::{EarlyExit, FromArgs};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Write;
use tracing::warn;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// against the session's [`Environment`].
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "add" or "search".
    fn name() -> &'static str;

    /// Other names the command answers to, such as its number in the menu.
    fn aliases() -> &'static [&'static str] {
        &[]
    }

    /// Executes the command, writing its report to `stdout`.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        match T::execute(*self, stdout, env) {
            Ok(x) => Ok(x),
            Err(e) => {
                warn!(command = T::name(), error = %e, "command failed");
                writeln!(stdout, "{}", e)?;
                Ok(1)
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        stdout.write_all(self.output.as_bytes())?;
        if !self.output.ends_with('\n') {
            writeln!(stdout)?;
        }
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() || T::aliases().contains(&name) {
            Some(match T::from_args(&[T::name()], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

/// Write one product the way every listing prints it.
fn write_product(stdout: &mut dyn Write, product: &Product, currency: &str) -> Result<()> {
    writeln!(stdout)?;
    writeln!(stdout, "Name: {}", product.name)?;
    writeln!(stdout, "Barcode: {}", product.barcode)?;
    writeln!(stdout, "Quantity: {}", product.quantity)?;
    writeln!(
        stdout,
        "Unit price: {}",
        fields::format_money(currency, product.unit_price)
    )?;
    writeln!(stdout, "Expiry date: {}", fields::format_date(product.expiry_date))?;
    match product.total_value() {
        Some(total) => writeln!(stdout, "Total value: {}", fields::format_money(currency, total))?,
        None => writeln!(stdout, "Total value: out of range")?,
    }
    Ok(())
}

/// Refuse records whose `quantity * unit_price` does not fit in a `Decimal`.
fn ensure_representable(product: &Product) -> Result<()> {
    if product.total_value().is_none() {
        bail!(
            "Value of {} units at {} is too large to represent",
            product.quantity,
            product.unit_price
        );
    }
    Ok(())
}

fn write_products<'a>(
    stdout: &mut dyn Write,
    products: impl IntoIterator<Item = &'a Product>,
    currency: &str,
) -> Result<()> {
    for product in products {
        write_product(stdout, product, currency)?;
    }
    Ok(())
}

#[derive(FromArgs)]
/// Add a product to the inventory.
pub struct Add {
    #[argh(positional)]
    /// barcode identifying the product; duplicates are allowed.
    pub barcode: String,

    #[argh(option)]
    /// product name.
    pub name: String,

    #[argh(option, from_str_fn(quantity_arg))]
    /// units in stock.
    pub quantity: u32,

    #[argh(option, from_str_fn(price_arg))]
    /// price of a single unit, e.g. 2.50.
    pub price: Decimal,

    #[argh(option, from_str_fn(date_arg))]
    /// expiry date as dd/mm/yyyy or yyyy-mm-dd.
    pub expiry: NaiveDate,
}

impl BuiltinCommand for Add {
    fn name() -> &'static str {
        "add"
    }

    fn aliases() -> &'static [&'static str] {
        &["1"]
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let product = Product::new(
            self.name,
            self.barcode,
            self.quantity,
            self.price,
            self.expiry,
        );
        ensure_representable(&product)?;
        env.store.add(product);
        writeln!(stdout, "Product added.")?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Update the first product with the given barcode.
/// Omitted fields keep their current values.
pub struct Update {
    #[argh(positional)]
    /// barcode of the product to update.
    pub barcode: String,

    #[argh(option)]
    /// new name; blank keeps the current one.
    pub name: Option<String>,

    #[argh(option, from_str_fn(quantity_arg))]
    /// new quantity.
    pub quantity: Option<u32>,

    #[argh(option, from_str_fn(price_arg))]
    /// new unit price.
    pub price: Option<Decimal>,

    #[argh(option, from_str_fn(date_arg))]
    /// new expiry date as dd/mm/yyyy or yyyy-mm-dd.
    pub expiry: Option<NaiveDate>,
}

impl BuiltinCommand for Update {
    fn name() -> &'static str {
        "update"
    }

    fn aliases() -> &'static [&'static str] {
        &["2"]
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let Some(existing) = env.store.find_by_barcode(&self.barcode) else {
            bail!("Product not found: {}", self.barcode);
        };

        let changes = Product {
            name: self
                .name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| existing.name.clone()),
            barcode: existing.barcode.clone(),
            quantity: self.quantity.unwrap_or(existing.quantity),
            unit_price: self.price.unwrap_or(existing.unit_price),
            expiry_date: self.expiry.unwrap_or(existing.expiry_date),
        };

        ensure_representable(&changes)?;
        env.store.update(&self.barcode, changes);
        writeln!(stdout, "Product updated.")?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Remove every product with the given barcode.
pub struct Remove {
    #[argh(positional)]
    /// barcode of the products to remove.
    pub barcode: String,
}

impl BuiltinCommand for Remove {
    fn name() -> &'static str {
        "remove"
    }

    fn aliases() -> &'static [&'static str] {
        &["3"]
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let removed = env.store.remove(&self.barcode);
        writeln!(stdout, "Removed {} product(s).", removed)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Search products by name, barcode or expiry date.
/// Exactly one criterion must be given.
pub struct Search {
    #[argh(option)]
    /// case-insensitive part of the product name.
    pub name: Option<String>,

    #[argh(option)]
    /// exact barcode; only the first match is shown.
    pub barcode: Option<String>,

    #[argh(option, from_str_fn(date_arg))]
    /// show products expiring on or before this date.
    pub expiry: Option<NaiveDate>,
}

impl BuiltinCommand for Search {
    fn name() -> &'static str {
        "search"
    }

    fn aliases() -> &'static [&'static str] {
        &["4"]
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let currency = env.config.currency_symbol.as_str();
        let found: Vec<&Product> = match (&self.name, &self.barcode, self.expiry) {
            (Some(name), None, None) => env.store.find_by_name(name).collect(),
            (None, Some(barcode), None) => {
                env.store.find_by_barcode(barcode).into_iter().collect()
            }
            (None, None, Some(cutoff)) => env.store.find_by_expiry_date(cutoff).collect(),
            _ => bail!("search: give exactly one of --name, --barcode or --expiry"),
        };

        writeln!(stdout, "Products found: {}", found.len())?;
        write_products(stdout, found, currency)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Show the total value of the stock.
pub struct Total {}

impl BuiltinCommand for Total {
    fn name() -> &'static str {
        "total"
    }

    fn aliases() -> &'static [&'static str] {
        &["5"]
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let Some(total) = env.store.total_value() else {
            bail!("Total stock value is too large to represent");
        };
        writeln!(
            stdout,
            "Total stock value: {}",
            fields::format_money(&env.config.currency_symbol, total)
        )?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Report products expiring within the given number of days, soonest first.
pub struct Expiring {
    #[argh(positional, from_str_fn(days_arg))]
    /// number of days from today.
    pub days: i64,
}

impl BuiltinCommand for Expiring {
    fn name() -> &'static str {
        "expiring"
    }

    fn aliases() -> &'static [&'static str] {
        &["6"]
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let expiring = env.store.expiring_within_from(env.today(), self.days);
        writeln!(
            stdout,
            "Products expiring within {} day(s): {}",
            self.days,
            expiring.len()
        )?;
        write_products(stdout, expiring, &env.config.currency_symbol)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// List every product in the order it was added.
pub struct List {}

impl BuiltinCommand for List {
    fn name() -> &'static str {
        "list"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        writeln!(stdout, "Products in stock: {}", env.store.len())?;
        write_products(stdout, &env.store, &env.config.currency_symbol)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn aliases() -> &'static [&'static str] {
        &["7", "quit"]
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.should_exit = true;
        Ok(0)
    }
}

const MENU: &[(&str, &str)] = &[
    ("1. add <barcode> --name --quantity --price --expiry", "add a product"),
    (
        "2. update <barcode> [--name] [--quantity] [--price] [--expiry]",
        "update a product",
    ),
    ("3. remove <barcode>", "remove products"),
    ("4. search --name | --barcode | --expiry", "search products"),
    ("5. total", "total stock value"),
    ("6. expiring <days>", "products about to expire"),
    ("7. exit", "leave the shell"),
    ("   list", "list every product"),
];

#[derive(FromArgs)]
/// Show the available commands.
pub struct Help {}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(self, stdout: &mut dyn Write, _env: &mut Environment) -> Result<ExitCode> {
        writeln!(stdout, "Choose an option:")?;
        for (usage, summary) in MENU {
            writeln!(stdout, "  {:<66} {}", usage, summary)?;
        }
        writeln!(stdout, "Run '<command> --help' for details.")?;
        Ok(0)
    }
}
