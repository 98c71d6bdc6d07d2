//! The in-memory product collection and its queries.

use crate::product::Product;
use chrono::{Local, NaiveDate, TimeDelta};
use regex::RegexBuilder;
use rust_decimal::Decimal;
use tracing::debug;

/// Insertion-ordered collection of [`Product`] records.
///
/// The store owns every record. Queries hand out shared references, so nothing
/// outside the store can mutate a record except through [`InventoryStore::update`].
/// "Not found" is never an error: lookups return `None`, empty iterators or
/// leave the collection untouched.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    products: Vec<Product>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records, duplicates included.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Append a record. Barcodes are not checked for uniqueness.
    pub fn add(&mut self, product: Product) {
        debug!(barcode = %product.barcode, name = %product.name, "adding product");
        self.products.push(product);
    }

    /// Overwrite name, quantity, unit price and expiry date of the first record
    /// with `barcode`. The record keeps its own barcode; the one in `changes` is
    /// ignored.
    ///
    /// Returns `false` and changes nothing when no record matches.
    pub fn update(&mut self, barcode: &str, changes: Product) -> bool {
        let Some(product) = self.products.iter_mut().find(|p| p.barcode == barcode) else {
            debug!(barcode, "update skipped, barcode not found");
            return false;
        };

        product.name = changes.name;
        product.quantity = changes.quantity;
        product.unit_price = changes.unit_price;
        product.expiry_date = changes.expiry_date;
        debug!(barcode, "product updated");
        true
    }

    /// Remove every record with `barcode`, returning how many were dropped.
    pub fn remove(&mut self, barcode: &str) -> usize {
        let before = self.products.len();
        self.products.retain(|p| p.barcode != barcode);
        let removed = before - self.products.len();
        debug!(barcode, removed, "removed products");
        removed
    }

    pub fn find_by_barcode(&self, barcode: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.barcode == barcode)
    }

    /// Records whose name contains `needle`, ignoring case, in insertion order.
    ///
    /// The iterator is lazy and can be cloned to restart the scan. An empty
    /// needle matches every record.
    pub fn find_by_name<'a>(
        &'a self,
        needle: &str,
    ) -> impl Iterator<Item = &'a Product> + Clone + use<'a> {
        let matcher = NameMatcher::new(needle);
        self.products.iter().filter(move |p| matcher.is_match(&p.name))
    }

    /// Records expiring on or before `cutoff`, in insertion order.
    pub fn find_by_expiry_date(
        &self,
        cutoff: NaiveDate,
    ) -> impl Iterator<Item = &Product> + Clone + '_ {
        self.products.iter().filter(move |p| p.expiry_date <= cutoff)
    }

    /// Sum of `quantity * unit_price` over all records; zero when empty.
    ///
    /// `None` when a record's value or the running sum overflows `Decimal`.
    pub fn total_value(&self) -> Option<Decimal> {
        self.products
            .iter()
            .try_fold(Decimal::ZERO, |sum, p| sum.checked_add(p.total_value()?))
    }

    /// Records expiring within `days` of the local calendar date, soonest first.
    pub fn expiring_within(&self, days: i64) -> Vec<&Product> {
        self.expiring_within_from(Local::now().date_naive(), days)
    }

    /// Records with `expiry_date <= today + days`, sorted ascending by expiry.
    ///
    /// The sort is stable, so records expiring on the same day keep their
    /// insertion order. Negative `days` move the cutoff into the past; a cutoff
    /// outside the calendar range saturates at its nearest end.
    pub fn expiring_within_from(&self, today: NaiveDate, days: i64) -> Vec<&Product> {
        let cutoff = offset_date(today, days);
        let mut expiring: Vec<&Product> = self.find_by_expiry_date(cutoff).collect();
        expiring.sort_by_key(|p| p.expiry_date);
        expiring
    }
}

impl<'a> IntoIterator for &'a InventoryStore {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn offset_date(today: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days)
        .and_then(|delta| today.checked_add_signed(delta))
        .unwrap_or(if days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// Case-insensitive substring test for product names.
///
/// The needle is escaped and compiled into a case-insensitive regex so that
/// Unicode case folding applies. If compilation fails (only possible for
/// absurdly long needles hitting the regex size limit) it falls back to
/// comparing lowercased strings.
#[derive(Clone)]
enum NameMatcher {
    Regex(regex::Regex),
    Lowercase(String),
}

impl NameMatcher {
    fn new(needle: &str) -> Self {
        match RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => NameMatcher::Regex(re),
            Err(_) => NameMatcher::Lowercase(needle.to_lowercase()),
        }
    }

    fn is_match(&self, name: &str) -> bool {
        match self {
            NameMatcher::Regex(re) => re.is_match(name),
            NameMatcher::Lowercase(needle) => name.to_lowercase().contains(needle.as_str()),
        }
    }
}
