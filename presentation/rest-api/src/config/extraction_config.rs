use business::domain::receipt::value_objects::NumberFormat;

/// How totals are read from recognized text.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionConfig {
    pub number_format: NumberFormat,
}

impl ExtractionConfig {
    /// Environment variables:
    /// - AMOUNT_NUMBER_FORMAT: "comma" for 14,000.50 or "period" for 14.000,50 (default: "comma")
    pub fn from_env() -> Self {
        Self {
            number_format: parse_number_format(std::env::var("AMOUNT_NUMBER_FORMAT").ok().as_deref()),
        }
    }
}

fn parse_number_format(raw: Option<&str>) -> NumberFormat {
    match raw {
        Some(value) => value.trim().to_lowercase().parse::<NumberFormat>().unwrap_or_else(|err| {
            tracing::warn!("{}, using {}", err, NumberFormat::default());
            NumberFormat::default()
        }),
        None => NumberFormat::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_comma_grouping() {
        assert_eq!(parse_number_format(None), NumberFormat::CommaThousands);
    }

    #[test]
    fn should_parse_period_grouping_case_insensitively() {
        assert_eq!(
            parse_number_format(Some("Period")),
            NumberFormat::PeriodThousands
        );
    }

    #[test]
    fn should_fall_back_on_unknown_format() {
        assert_eq!(
            parse_number_format(Some("space")),
            NumberFormat::CommaThousands
        );
    }
}
