use chrono::NaiveDate;
use inventory_tracker::Interpreter;
use inventory_tracker::env::{Environment, ShellConfig};
use rust_decimal_macros::dec;

fn shell() -> Interpreter {
    Interpreter::with_environment(Environment::with_config(ShellConfig {
        currency_symbol: "$".to_string(),
        today: NaiveDate::from_ymd_opt(2026, 10, 16),
    }))
}

fn feed(sh: &mut Interpreter, lines: &[&str]) -> String {
    let mut out: Vec<u8> = Vec::new();
    for line in lines {
        if let Err(err) = sh.execute_line(line, &mut out) {
            out.extend_from_slice(format!("Error: {}\n", err).as_bytes());
        }
        if sh.should_exit() {
            break;
        }
    }
    String::from_utf8(out).unwrap()
}

#[test]
fn full_session_walkthrough() {
    let mut sh = shell();
    let out = feed(
        &mut sh,
        &[
            "add 001 --name 'Whole milk' --quantity 10 --price 2.50 --expiry 20/10/2026",
            "add 002 --name Bread --quantity 3 --price 9.99 --expiry 2026-10-18",
            "add 003 --name Rice --quantity 5 --price 4 --expiry 01/06/2027",
            "total",
            "update 002 --price 8.99",
            "search --name MILK",
            "remove 003",
            "expiring 7",
            "exit",
            "total",
        ],
    );

    let expected = "\
Product added.
Product added.
Product added.
Total stock value: $74.97
Product updated.
Products found: 1

Name: Whole milk
Barcode: 001
Quantity: 10
Unit price: $2.50
Expiry date: 20/10/2026
Total value: $25.00
Removed 1 product(s).
Products expiring within 7 day(s): 2

Name: Bread
Barcode: 002
Quantity: 3
Unit price: $8.99
Expiry date: 18/10/2026
Total value: $26.97

Name: Whole milk
Barcode: 001
Quantity: 10
Unit price: $2.50
Expiry date: 20/10/2026
Total value: $25.00
";
    assert_eq!(out, expected);
    assert!(sh.should_exit());
    assert_eq!(sh.env().store.total_value(), Some(dec!(51.97)));
}

#[test]
fn errors_do_not_end_the_session() {
    let mut sh = shell();
    let out = feed(
        &mut sh,
        &[
            "add 001 --name Milk --quantity -2 --price 1 --expiry 20/10/2026",
            "add 001 --name Milk --quantity 2 --price 1 --expiry 32/10/2026",
            "update 999 --quantity 1",
            "sell 001",
            "add 002 --name Gold --quantity 4294967295 --price 79228162514264337593543950335 \
             --expiry 20/10/2026",
            "search --name 'unterminated",
            "add 001 --name Milk --quantity 2 --price 1 --expiry 20/10/2026",
            "total",
        ],
    );

    assert!(out.contains("Error: command not found: sell"));
    assert!(out.contains("Error: unfinished quote"));
    assert!(out.contains("Product not found: 999"));
    assert!(out.contains("too large to represent"));
    assert!(out.ends_with("Product added.\nTotal stock value: $2.00\n"), "got: {}", out);
    assert_eq!(sh.env().store.len(), 1);
}

#[test]
fn removed_barcode_is_gone() {
    let mut sh = shell();
    let out = feed(
        &mut sh,
        &[
            "add 001 --name Milk --quantity 1 --price 1 --expiry 20/10/2026",
            "add 001 --name Milk --quantity 1 --price 1 --expiry 21/10/2026",
            "remove 001",
            "search --barcode 001",
            "total",
        ],
    );

    assert!(out.contains("Removed 2 product(s).\nProducts found: 0\nTotal stock value: $0.00\n"));
    assert!(sh.env().store.find_by_barcode("001").is_none());
}
