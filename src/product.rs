use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A single inventory record.
///
/// The barcode is the de facto identifier, but nothing enforces its uniqueness:
/// a store may hold several products sharing one barcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub barcode: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub expiry_date: NaiveDate,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        barcode: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            barcode: barcode.into(),
            quantity,
            unit_price,
            expiry_date,
        }
    }

    /// Stock value of this record, `quantity * unit_price`.
    ///
    /// Always derived from the current fields, never cached. `None` when the
    /// product does not fit in a `Decimal`.
    pub fn total_value(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_total_value_is_exact() {
        let p = Product::new("Beans", "002", 3, dec!(9.99), date(2026, 1, 1));
        assert_eq!(p.total_value(), Some(dec!(29.97)));
    }

    #[test]
    fn test_total_value_follows_mutation() {
        let mut p = Product::new("Milk", "001", 10, dec!(2.50), date(2026, 1, 1));
        assert_eq!(p.total_value(), Some(dec!(25)));

        p.quantity = 4;
        p.unit_price = dec!(0.10);
        assert_eq!(p.total_value(), Some(dec!(0.40)));
    }

    #[test]
    fn test_zero_quantity_is_worth_nothing() {
        let p = Product::new("Salt", "003", 0, dec!(1.25), date(2030, 6, 1));
        assert_eq!(p.total_value(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_total_value_overflow_is_none() {
        let p = Product::new("Gold", "004", u32::MAX, Decimal::MAX, date(2026, 10, 20));
        assert_eq!(p.total_value(), None);
    }
}
