// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

use crate::error::Result;

/// Make sure a service root ends with a slash so resources append under it.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

/// Build the URL of a resource under an OData service root.
///
/// The resource name is appended verbatim, so `$metadata` and entity-set
/// names keep their exact spelling.
///
/// # Examples
/// ```
/// use bionet_pct::utils::url::service_url;
///
/// let url = service_url("https://example.com/odata", "$metadata").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/odata/$metadata");
/// ```
pub fn service_url(base: &str, resource: &str) -> Result<Url> {
    let joined = format!("{}{}", normalize_base(base), resource.trim_start_matches('/'));
    Ok(Url::parse(&joined)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("https://a.b/odata"), "https://a.b/odata/");
        assert_eq!(normalize_base("https://a.b/odata/"), "https://a.b/odata/");
    }

    #[test]
    fn test_service_url_entity_set() {
        let url = service_url(
            "https://data.bionet.nsw.gov.au/biosvcapp/odata/",
            "VegetationClassification_PCTBenchmarks",
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://data.bionet.nsw.gov.au/biosvcapp/odata/VegetationClassification_PCTBenchmarks"
        );
    }

    #[test]
    fn test_service_url_metadata() {
        let url = service_url("https://data.bionet.nsw.gov.au/biosvcapp/odata/", "$metadata")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://data.bionet.nsw.gov.au/biosvcapp/odata/$metadata"
        );
    }

    #[test]
    fn test_service_url_rejects_garbage() {
        assert!(service_url("not a url", "x").is_err());
    }
}
