use anyhow::{Context, Result};

use crate::customs::{ItemDefaults, Money, PageCapacities, Weight};

/// Sender / return-address block printed on every customs sheet.
#[derive(Debug, Clone)]
pub struct SenderProfile {
    /// Importer of record in the destination country (return address).
    pub name_domestic: String,
    pub address_domestic: String,
    pub postal_line_domestic: String,
    /// Shipper name as printed in the "Remetente" block.
    pub name_abroad: String,
    pub city: String,
    pub country_of_origin: String,
    pub sales_site: String,
    /// Postal contract number used when the order carries none.
    pub contract_number: String,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    pub page_capacities: PageCapacities,
    pub freight: Money,
    pub insurance: Money,
    pub item_defaults: ItemDefaults,
    pub sender: SenderProfile,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let page_capacities =
            page_capacities_from_env("CUSTOMS_FIRST_PAGE_CAPACITY", "CUSTOMS_LATER_PAGE_CAPACITY")?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", "10")?,
            port: parse_env("PORT", "8080")?,
            rust_log: env_or("RUST_LOG", "info"),
            page_capacities,
            freight: Money::parse(&env_or("CUSTOMS_FREIGHT", "20.00"), "CUSTOMS_FREIGHT")?,
            insurance: Money::parse(&env_or("CUSTOMS_INSURANCE", "20.00"), "CUSTOMS_INSURANCE")?,
            item_defaults: ItemDefaults {
                customs_code: env_or("DEFAULT_NCM", "331090"),
                unit_weight: Weight::parse_kg(
                    &env_or("DEFAULT_ITEM_WEIGHT_KG", "0.5"),
                    "DEFAULT_ITEM_WEIGHT_KG",
                )?,
            },
            sender: SenderProfile {
                name_domestic: env_or("SENDER_NAME_DOMESTIC", "IMPORTADORA DE REMESSAS LTDA"),
                address_domestic: env_or("SENDER_ADDRESS_DOMESTIC", "Rua do Porto, 100"),
                postal_line_domestic: env_or("SENDER_POSTAL_LINE", "20000-000 - Rio de Janeiro/RJ"),
                name_abroad: env_or("SENDER_NAME_ABROAD", "Online Store"),
                city: env_or("SENDER_CITY", "Rio de Janeiro"),
                country_of_origin: env_or("SENDER_COUNTRY", "Brasil"),
                sales_site: env_or("SALES_SITE", "example.com.br"),
                contract_number: env_or("CONTRACT_NUMBER", "0000000000"),
            },
        })
    }
}

/// Reads both sheet capacities (defaults 3 and 20) and rejects non-positive values.
fn page_capacities_from_env(first_key: &str, later_key: &str) -> Result<PageCapacities> {
    let first: i64 = parse_env(first_key, "3")?;
    let later: i64 = parse_env(later_key, "20")?;
    PageCapacities::new(first, later).context("customs page capacities are misconfigured")
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_or(key, default)
        .trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>()))
}

#[cfg(test)]
impl Config {
    /// Defaults used by handler tests; mirrors an unset environment.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/test".to_string(),
            db_max_connections: 1,
            port: 0,
            rust_log: "debug".to_string(),
            page_capacities: PageCapacities::new(3, 20).unwrap(),
            freight: Money::from_cents(2000).unwrap(),
            insurance: Money::from_cents(2000).unwrap(),
            item_defaults: ItemDefaults {
                customs_code: "331090".to_string(),
                unit_weight: Weight::from_grams(500).unwrap(),
            },
            sender: SenderProfile {
                name_domestic: "IMPORTADORA TESTE LTDA".to_string(),
                address_domestic: "Rua A, 1".to_string(),
                postal_line_domestic: "20000-000 - Rio de Janeiro/RJ".to_string(),
                name_abroad: "Test Store".to_string(),
                city: "Rio de Janeiro".to_string(),
                country_of_origin: "Brasil".to_string(),
                sales_site: "test.example".to_string(),
                contract_number: "1234567890".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let v: u16 = parse_env("BACKOFFICE_TEST_UNSET_PORT_VAR", "8081").unwrap();
        assert_eq!(v, 8081);
    }

    #[test]
    fn test_parse_env_reports_key_on_bad_value() {
        let err = parse_env::<u16>("BACKOFFICE_TEST_UNSET_BAD_VAR", "not-a-port").unwrap_err();
        assert!(err.to_string().contains("BACKOFFICE_TEST_UNSET_BAD_VAR"));
    }

    #[test]
    fn test_page_capacities_default_to_three_and_twenty() {
        let caps = page_capacities_from_env(
            "BACKOFFICE_TEST_UNSET_FIRST_CAP",
            "BACKOFFICE_TEST_UNSET_LATER_CAP",
        )
        .unwrap();
        assert_eq!((caps.first(), caps.later()), (3, 20));
    }

    #[test]
    fn test_non_positive_page_capacity_is_rejected() {
        std::env::set_var("BACKOFFICE_TEST_ZERO_FIRST_CAP", "0");
        let err = page_capacities_from_env(
            "BACKOFFICE_TEST_ZERO_FIRST_CAP",
            "BACKOFFICE_TEST_UNSET_LATER_CAP_2",
        )
        .unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("misconfigured"));
        assert!(chain.contains("first_page_capacity"));
    }
}
