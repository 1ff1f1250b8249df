use chrono::format::{Item, StrftimeItems};
use platform_core::config::{self as core_config, get_env};
use platform_core::error::AppError;
use serde::Deserialize;
use validator::{Validate, ValidationError};

pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";
pub const DEFAULT_EXPIRY_WARNING_DAYS: i64 = 7;
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EntitlementConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    #[validate(nested)]
    pub display: DisplayConfig,
}

/// Settings for the presentation formatter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct DisplayConfig {
    /// strftime pattern for expiry dates outside the warning window.
    #[validate(length(min = 1), custom(function = "validate_date_format"))]
    pub date_format: String,
    /// Expiries up to this many days out are shown as "Expires in N days".
    #[validate(range(min = 2, max = 30))]
    pub expiry_warning_days: i64,
    /// Currency reported when there is no subscription to take it from.
    #[validate(length(equal = 3))]
    pub default_currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

fn validate_date_format(date_format: &str) -> Result<(), ValidationError> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(ValidationError::new("invalid_date_format"));
    }
    Ok(())
}

impl EntitlementConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_env(common_config)
    }

    /// Build from already-loaded common settings plus `ENTITLEMENT_*` variables.
    pub fn from_env(common: core_config::Config) -> Result<Self, AppError> {
        let is_prod = common.is_prod();

        let expiry_warning_days = get_env(
            "ENTITLEMENT_EXPIRY_WARNING_DAYS",
            Some(&DEFAULT_EXPIRY_WARNING_DAYS.to_string()),
            is_prod,
        )?
        .parse::<i64>()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "ENTITLEMENT_EXPIRY_WARNING_DAYS must be an integer: {}",
                e
            ))
        })?;

        let config = EntitlementConfig {
            service_name: get_env("SERVICE_NAME", Some("entitlement-service"), is_prod)?,
            display: DisplayConfig {
                date_format: get_env(
                    "ENTITLEMENT_DATE_FORMAT",
                    Some(DEFAULT_DATE_FORMAT),
                    is_prod,
                )?,
                expiry_warning_days,
                default_currency: get_env(
                    "ENTITLEMENT_DEFAULT_CURRENCY",
                    Some(DEFAULT_CURRENCY),
                    is_prod,
                )?,
            },
            common,
        };

        config.validate()?;

        tracing::debug!(
            service_name = %config.service_name,
            date_format = %config.display.date_format,
            expiry_warning_days = config.display.expiry_warning_days,
            "Entitlement configuration loaded"
        );

        Ok(config)
    }
}
