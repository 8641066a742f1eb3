//! State-agency record download.
//!
//! Agencies expose per-well production pages behind URL schemes built
//! from pieces of the well's API number (or a state-assigned file
//! number). The URL template and the credentials requirement come from
//! the jurisdiction's `ColumnConfig`; credentials themselves come from
//! the environment (`.env` supported) and are never stored in config
//! files.
//!
//! Scraping public agency sites may be subject to their Terms of
//! Service; the fetch subcommand is deliberately sequential and pauses
//! between wells.

use reqwest::blocking::Client;

use crate::config::ColumnConfig;
use crate::error::AppError;

#[derive(Debug)]
pub struct AgencyClient {
    client: Client,
    url_template: String,
    credentials: Option<(String, String)>,
}

impl AgencyClient {
    /// Build a client for the configured jurisdiction.
    ///
    /// Fails when the jurisdiction has no production URL configured
    /// (not every state exposes one) or when required credentials are
    /// absent from the environment.
    pub fn from_config(config: &ColumnConfig) -> Result<Self, AppError> {
        let url_template = config.prod_url_template.clone().ok_or_else(|| {
            AppError::new(
                2,
                "No production URL configured for this jurisdiction; fetch is not available.",
            )
        })?;

        let credentials = if config.requires_credentials {
            dotenvy::dotenv().ok();
            let user = std::env::var("AGENCY_USER")
                .map_err(|_| AppError::new(2, "Missing AGENCY_USER in environment (.env)."))?;
            let password = std::env::var("AGENCY_PASSWORD")
                .map_err(|_| AppError::new(2, "Missing AGENCY_PASSWORD in environment (.env)."))?;
            Some((user, password))
        } else {
            None
        };

        Ok(Self {
            client: Client::new(),
            url_template,
            credentials,
        })
    }

    /// Fill the URL template's `{0}`, `{1}`, ... placeholders with the
    /// well-specific components.
    pub fn production_url(&self, components: &[String]) -> String {
        let mut url = self.url_template.clone();
        for (i, component) in components.iter().enumerate() {
            url = url.replace(&format!("{{{i}}}"), component);
        }
        url
    }

    /// Download one well's production page/export as text.
    pub fn fetch_text(&self, url: &str) -> Result<String, AppError> {
        let mut request = self.client.get(url);
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }

        let response = request
            .send()
            .map_err(|e| AppError::new(4, format!("Agency request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Agency request failed with status {}.", response.status()),
            ));
        }

        response
            .text()
            .map_err(|e| AppError::new(4, format!("Failed to read agency response: {e}")))
    }
}

/// Split an API number into the URL components most states expect.
///
/// Colorado builds its URL from the county code and the well sequence,
/// i.e. everything after the leading state prefix of `05-001-07727`.
pub fn url_components_from_api(api_number: &str) -> Vec<String> {
    let mut parts: Vec<String> = api_number.split('-').map(String::from).collect();
    if parts.len() > 1 {
        parts.remove(0);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Jurisdiction;

    #[test]
    fn url_template_substitution() {
        let config = crate::config::preset(Jurisdiction::Co).unwrap();
        let client = AgencyClient::from_config(&config).unwrap();
        let components = url_components_from_api("05-001-07727");
        assert_eq!(components, vec!["001".to_string(), "07727".to_string()]);
        let url = client.production_url(&components);
        assert_eq!(
            url,
            "https://cogcc.state.co.us/cogisdb/Facility/Production?api_county_code=001&api_seq_num=07727"
        );
    }

    #[test]
    fn missing_template_is_an_error() {
        let mut config = crate::config::preset(Jurisdiction::Co).unwrap();
        config.prod_url_template = None;
        let err = AgencyClient::from_config(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn single_component_api_numbers_pass_through() {
        assert_eq!(url_components_from_api("33785"), vec!["33785".to_string()]);
    }
}
