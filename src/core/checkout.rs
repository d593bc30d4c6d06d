//! Checkout hand-off.
//!
//! There is no server-side order record: confirming a purchase builds a
//! plain-text order summary and a wa.me deep link with the message
//! percent-encoded. Opening the link is left to the user's terminal.

use crate::core::catalog::Product;

pub const DEFAULT_WHATSAPP_PHONE: &str = "6281234567890";

pub struct Order<'a> {
    pub product: &'a Product,
    pub buyer_name: &'a str,
    pub buyer_email: &'a str,
}

impl Order<'_> {
    /// Both buyer fields must be filled before confirm is enabled.
    pub fn is_complete(&self) -> bool {
        !self.buyer_name.trim().is_empty() && !self.buyer_email.trim().is_empty()
    }

    pub fn message(&self) -> String {
        format!(
            "Halo HomeyTips, saya ingin membeli template: *{}* seharga Rp {}. \n\nNama: {}\nEmail: {}",
            self.product.title,
            format_rupiah(self.product.price),
            self.buyer_name,
            self.buyer_email,
        )
    }

    pub fn deep_link(&self, phone: &str) -> String {
        format!(
            "https://wa.me/{}?text={}",
            phone,
            urlencoding::encode(&self.message())
        )
    }
}

/// Group digits with dots, Indonesian style: 49000 -> "49.000".
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
