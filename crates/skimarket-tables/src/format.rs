//! Cell rendering
//!
//! The engine decides *which* formatter a cell goes through (the column's
//! [`CellFormat`]); a [`CellFormatter`] decides what the text looks like.

use crate::column::CellFormat;
use crate::settings::FormatSettings;
use crate::value::CellValue;
use chrono::NaiveDate;
use std::fmt::Write;

/// Turns a cell value into display text
pub trait CellFormatter {
	/// Renders `value` for a column of the given format
	fn format(&self, value: &CellValue, format: CellFormat) -> String;
}

impl<F> CellFormatter for F
where
	F: Fn(&CellValue, CellFormat) -> String,
{
	fn format(&self, value: &CellValue, format: CellFormat) -> String {
		self(value, format)
	}
}

/// Formatter driven by [`FormatSettings`]
///
/// # Examples
///
/// ```
/// use skimarket_tables::{CellFormat, CellFormatter, CellValue, DefaultFormatter};
///
/// let formatter = DefaultFormatter::default();
/// assert_eq!(
///     formatter.format(&CellValue::Float(1234.5), CellFormat::Currency),
///     "1 234,50 €"
/// );
/// assert_eq!(
///     formatter.format(&CellValue::from("2025-02-14"), CellFormat::Date),
///     "14/02/2025"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultFormatter {
	settings: FormatSettings,
}

impl DefaultFormatter {
	/// Creates a formatter from settings
	pub fn new(settings: FormatSettings) -> Self {
		Self { settings }
	}

	/// Settings in use
	pub fn settings(&self) -> &FormatSettings {
		&self.settings
	}

	fn number(&self, value: &CellValue) -> String {
		match value {
			CellValue::Int(n) => self.group(&n.unsigned_abs().to_string(), *n < 0),
			CellValue::Float(_) | CellValue::Text(_) => match numeric(value) {
				Some(n) if n.fract() == 0.0 => self.fixed(n, 0),
				Some(n) => self.fixed(n, self.settings.decimals),
				None => value.to_plain_text(),
			},
			other => other.to_plain_text(),
		}
	}

	fn currency(&self, value: &CellValue) -> String {
		match numeric(value) {
			Some(n) => format!(
				"{} {}",
				self.fixed(n, self.settings.decimals),
				self.settings.currency_symbol
			),
			None => value.to_plain_text(),
		}
	}

	fn date(&self, value: &CellValue) -> String {
		let date_only = match value {
			CellValue::Date(_) => true,
			CellValue::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").is_ok(),
			_ => false,
		};
		let Some(datetime) = value.as_datetime() else {
			return value.to_plain_text();
		};
		let pattern = if date_only {
			&self.settings.date_format
		} else {
			&self.settings.datetime_format
		};
		let mut out = String::new();
		// An invalid pattern surfaces as fmt::Error rather than a panic here
		if write!(out, "{}", datetime.format(pattern)).is_err() {
			tracing::debug!(pattern = %pattern, "invalid date format, rendering raw value");
			return value.to_plain_text();
		}
		out
	}

	fn fixed(&self, n: f64, decimals: usize) -> String {
		let rendered = format!("{:.*}", decimals, n.abs());
		let (int_part, frac_part) = match rendered.split_once('.') {
			Some((int_part, frac_part)) => (int_part, Some(frac_part)),
			None => (rendered.as_str(), None),
		};
		let negative = n < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0');
		let mut out = self.group(int_part, negative);
		if let Some(frac_part) = frac_part {
			out.push_str(&self.settings.decimal_separator);
			out.push_str(frac_part);
		}
		out
	}

	fn group(&self, digits: &str, negative: bool) -> String {
		let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
		if negative {
			out.push('-');
		}
		for (i, c) in digits.chars().enumerate() {
			if i > 0 && (digits.len() - i) % 3 == 0 {
				out.push_str(&self.settings.thousands_separator);
			}
			out.push(c);
		}
		out
	}
}

impl CellFormatter for DefaultFormatter {
	fn format(&self, value: &CellValue, format: CellFormat) -> String {
		if value.is_null() {
			return String::new();
		}
		match format {
			CellFormat::Actions => String::new(),
			CellFormat::Currency => self.currency(value),
			CellFormat::Number => self.number(value),
			CellFormat::Date => self.date(value),
			CellFormat::Text | CellFormat::Badge => value.to_plain_text(),
		}
	}
}

fn numeric(value: &CellValue) -> Option<f64> {
	match value {
		CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
		other => other.as_f64().filter(|n| n.is_finite()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;
	use rstest::rstest;

	#[rstest]
	#[case(CellValue::Int(0), CellFormat::Number, "0")]
	#[case(CellValue::Int(999), CellFormat::Number, "999")]
	#[case(CellValue::Int(1000), CellFormat::Number, "1 000")]
	#[case(CellValue::Int(-1234567), CellFormat::Number, "-1 234 567")]
	#[case(CellValue::Float(2.5), CellFormat::Number, "2,50")]
	#[case(CellValue::Float(3000.0), CellFormat::Number, "3 000")]
	#[case(CellValue::Int(320), CellFormat::Currency, "320,00 €")]
	#[case(CellValue::Float(1234.5), CellFormat::Currency, "1 234,50 €")]
	#[case(CellValue::Float(-0.001), CellFormat::Currency, "0,00 €")]
	#[case(CellValue::from("89.9"), CellFormat::Currency, "89,90 €")]
	#[case(CellValue::from("n/a"), CellFormat::Currency, "n/a")]
	#[case(CellValue::from("confirmed"), CellFormat::Badge, "confirmed")]
	#[case(CellValue::Bool(true), CellFormat::Text, "true")]
	#[case(CellValue::Null, CellFormat::Currency, "")]
	#[case(CellValue::Int(5), CellFormat::Actions, "")]
	fn test_default_formatter(
		#[case] value: CellValue,
		#[case] format: CellFormat,
		#[case] expected: &str,
	) {
		let formatter = DefaultFormatter::default();
		assert_eq!(formatter.format(&value, format), expected);
	}

	#[rstest]
	#[case(CellValue::from("2025-02-14"), "14/02/2025")]
	#[case(CellValue::from("2025-02-14T09:05:00"), "14/02/2025 09:05")]
	#[case(CellValue::Date(NaiveDate::from_ymd_opt(2024, 12, 24).unwrap()), "24/12/2024")]
	#[case(CellValue::from("tomorrow"), "tomorrow")]
	fn test_date_format(#[case] value: CellValue, #[case] expected: &str) {
		let formatter = DefaultFormatter::default();
		assert_eq!(formatter.format(&value, CellFormat::Date), expected);
	}

	#[test]
	fn test_custom_settings() {
		let formatter = DefaultFormatter::new(FormatSettings {
			currency_symbol: "CHF".to_string(),
			currency_code: "CHF".to_string(),
			decimal_separator: ".".to_string(),
			thousands_separator: "'".to_string(),
			decimals: 2,
			date_format: "%Y-%m-%d".to_string(),
			datetime_format: "%Y-%m-%d %H:%M".to_string(),
		});
		assert_eq!(
			formatter.format(&CellValue::Float(12500.0), CellFormat::Currency),
			"12'500.00 CHF"
		);
	}

	#[test]
	fn test_invalid_pattern_falls_back_to_raw_value() {
		let formatter = DefaultFormatter::new(FormatSettings {
			date_format: "%Q".to_string(),
			..FormatSettings::default()
		});
		assert_eq!(
			formatter.format(&CellValue::from("2025-02-14"), CellFormat::Date),
			"2025-02-14"
		);
	}

	#[test]
	fn test_closure_formatter() {
		let upper = |value: &CellValue, _: CellFormat| value.to_plain_text().to_uppercase();
		assert_eq!(upper.format(&CellValue::from("open"), CellFormat::Badge), "OPEN");
	}
}
