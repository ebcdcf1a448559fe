//! Locale-aware rendering of amounts and dates for terminal output.
//!
//! Two number/date styles are supported: `pt-BR` (the default for this tool) and
//! `en-US`, which also serves every locale we have no specific style for.

use chrono::NaiveDate;

pub const DEFAULT_LOCALE: &str = "pt-BR";

struct Style {
    symbol: &'static str,
    /// Space between symbol and digits
    spaced: bool,
    thousands: char,
    decimal: char,
    date_fmt: &'static str,
}

const EN_US: Style = Style {
    symbol: "$",
    spaced: false,
    thousands: ',',
    decimal: '.',
    date_fmt: "%b %-d, %Y",
};

const PT_BR: Style = Style {
    symbol: "R$",
    spaced: true,
    thousands: '.',
    decimal: ',',
    date_fmt: "%d/%m/%Y",
};

fn style_for(locale: &str) -> &'static Style {
    if locale.eq_ignore_ascii_case("pt-BR") {
        &PT_BR
    } else {
        &EN_US
    }
}

/// `$1,234.56` / `-$50.00` for en-US, `R$ 1.234,56` / `-R$ 50,00` for pt-BR.
pub fn format_currency(amount: f64, locale: &str) -> String {
    let style = style_for(locale);
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100, style.thousands);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let gap = if style.spaced { " " } else { "" };
    format!(
        "{sign}{}{gap}{whole}{}{:02}",
        style.symbol,
        style.decimal,
        cents % 100
    )
}

/// `Jan 15, 2024` for en-US, `15/01/2024` for pt-BR.
pub fn format_date(date: NaiveDate, locale: &str) -> String {
    date.format(style_for(locale).date_fmt).to_string()
}

fn group_thousands(mut n: u64, sep: char) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(&sep.to_string())
}

/// Locale from a POSIX `LANG` value (`en_US.UTF-8` becomes `en-US`).
/// `C`, `POSIX`, unset or empty fall back to [`DEFAULT_LOCALE`].
pub fn default_locale(env_lang: Option<&str>) -> String {
    env_lang
        .map(|raw| {
            let raw = raw.split(['.', '@']).next().unwrap_or("");
            raw.trim().replace('_', "-")
        })
        .filter(|tag| !tag.is_empty() && tag != "C" && tag != "POSIX")
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Language subtag: `pt` for `pt-BR`.
pub fn language_of(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}
