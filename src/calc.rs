//! Derived numbers shown next to tables: star ratings and invoice totals.

/// Aggregate over a set of 1-5 star reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSummary {
    /// Mean rating rounded to one decimal, 0.0 when there are no reviews.
    pub average: f64,
    pub count: usize,
    /// Review counts for 1..=5 stars, index 0 is one star.
    pub distribution: [usize; 5],
    pub full_stars: u8,
    pub half_star: bool,
    pub empty_stars: u8,
}

impl RatingSummary {
    /// Star strip such as `★★★⯪☆`.
    pub fn stars(&self) -> String {
        let mut out = "★".repeat(self.full_stars as usize);
        if self.half_star {
            out.push('⯪');
        }
        out.push_str(&"☆".repeat(self.empty_stars as usize));
        out
    }

    /// Share of reviews with `star` stars, in percent.
    pub fn percent(&self, star: u8) -> f64 {
        if self.count == 0 || !(1..=5).contains(&star) {
            return 0.0;
        }
        self.distribution[star as usize - 1] as f64 * 100.0 / self.count as f64
    }
}

/// Ratings outside 1..=5 are clamped into range.
pub fn summarize_ratings(ratings: &[u8]) -> RatingSummary {
    let mut distribution = [0usize; 5];
    let mut sum = 0u64;
    for rating in ratings {
        let star = (*rating).clamp(1, 5);
        distribution[star as usize - 1] += 1;
        sum += u64::from(star);
    }

    let count = ratings.len();
    let average = if count == 0 {
        0.0
    } else {
        (sum as f64 / count as f64 * 10.0).round() / 10.0
    };

    // Halves: x.0-x.2 rounds down, x.3-x.7 is a half star, x.8+ rounds up.
    let whole = average.floor();
    let frac = average - whole;
    let (full, half) = if frac >= 0.75 {
        (whole as u8 + 1, false)
    } else if frac >= 0.25 {
        (whole as u8, true)
    } else {
        (whole as u8, false)
    };
    let full = full.min(5);
    let empty = 5 - full - u8::from(half);

    RatingSummary {
        average,
        count,
        distribution,
        full_stars: full,
        half_star: half,
        empty_stars: empty,
    }
}

/// One invoice line. Prices are in cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: u64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: u64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.quantity) * self.unit_price
    }
}

/// All amounts in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvoiceTotals {
    pub subtotal: u64,
    pub discount: u64,
    pub tax: u64,
    pub total: u64,
}

/// `amount * pct / 100`, rounded half up to a whole cent.
fn percent_of(amount: u64, pct: f64) -> u64 {
    if pct <= 0.0 {
        return 0;
    }
    (amount as f64 * pct / 100.0 + 0.5).floor() as u64
}

/// Subtotal, then a percentage discount, then tax on the discounted amount.
/// Discounts above 100% are capped.
pub fn invoice_totals(items: &[LineItem], discount_pct: f64, tax_pct: f64) -> InvoiceTotals {
    let subtotal: u64 = items.iter().map(LineItem::total).sum();
    let discount = percent_of(subtotal, discount_pct.min(100.0));
    let taxable = subtotal - discount;
    let tax = percent_of(taxable, tax_pct);
    InvoiceTotals {
        subtotal,
        discount,
        tax,
        total: taxable + tax,
    }
}

/// `1234567` cents as `12,345.67`.
pub fn format_amount(cents: u64) -> String {
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}.{:02}", grouped, cents % 100)
}

/// Parse an amount such as `1,250.5` into cents. At most two decimals.
pub fn parse_amount(raw: &str) -> Option<u64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let (whole, frac) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || frac.len() > 2 || !digits(whole) || !digits(frac) {
        return None;
    }
    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let cents: u64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<u64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(cents)
}
