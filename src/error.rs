use thiserror::Error;

/// Failures while retrieving a recipe page.
///
/// The `Display` text of every variant is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("The website took too long to respond. Please try again or use Manual Entry.")]
    Timeout,

    #[error(
        "Could not connect to the website. Check your internet connection or try a different URL."
    )]
    ConnectionFailed,

    /// The site answered 403
    #[error(
        "This website is blocking automated access. Please use 'Manual Entry' or 'Scan Recipe' to add this recipe!"
    )]
    Blocked,

    /// The site answered 404
    #[error("Recipe not found at this URL. Please check the link and try again.")]
    NotFound,

    /// Any other non-success status
    #[error("Website returned error {0}. Please try a different URL.")]
    HttpStatus(u16),

    /// Invalid URL, undecodable body or any other transport fault
    #[error(
        "Could not extract recipe from {host}. This site may block scraping or use a format we don't support."
    )]
    Unreadable { host: String },
}

impl FetchError {
    /// Classify a transport error from reqwest.
    pub fn from_reqwest(err: &reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectionFailed
        } else if let Some(status) = err.status() {
            FetchError::from_status(status.as_u16())
        } else {
            FetchError::Unreadable {
                host: host_of(url),
            }
        }
    }

    pub fn from_status(status: u16) -> Self {
        match status {
            403 => FetchError::Blocked,
            404 => FetchError::NotFound,
            other => FetchError::HttpStatus(other),
        }
    }
}

/// Host part of a URL for error messages, or the raw input when it does not parse.
pub(crate) fn host_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed.host_str().map(|host| match parsed.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            })
        })
        .unwrap_or_else(|| url.to_string())
}

/// The page was retrieved but held no usable recipe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error(
        "This website is blocking automated access or uses a format we don't support. Please use 'Manual Entry' or 'Scan Recipe' to add this recipe!"
    )]
    Incomplete,
}

/// Failures of the photo scanning pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VisionError {
    #[error(
        "Recipe scanning is not available right now: the ANTHROPIC_API_KEY environment variable is not set."
    )]
    MissingCredential,

    #[error(
        "The AI service is very busy right now with too many requests. This usually happens during peak hours (business hours in the US). Please try again in 10-30 minutes, or use Manual Entry to add your recipe now. The scanner works best early morning or late evening!"
    )]
    ServiceOverloaded,

    #[error("Could not parse recipe data from AI response: {0}")]
    MalformedResponse(String),

    /// Provider rejected the request for a reason other than overload.
    /// `detail` is for logs only and never part of the message.
    #[error("Could not read a recipe from this image. Please try again or use Manual Entry.")]
    Provider { detail: String },

    /// The image file could not be read from disk
    #[error("Could not read the image file {path}. Please choose another photo.")]
    ImageRead { path: String },
}

/// Errors that can occur during recipe import operations
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Vision(#[from] VisionError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ImportError {
    /// The ready-to-display message relayed to end users.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(FetchError::from_status(403), FetchError::Blocked);
        assert_eq!(FetchError::from_status(404), FetchError::NotFound);
        assert_eq!(FetchError::from_status(500), FetchError::HttpStatus(500));
        assert_eq!(
            FetchError::HttpStatus(502).to_string(),
            "Website returned error 502. Please try a different URL."
        );
    }

    #[test]
    fn test_manual_fallback_messages() {
        assert!(ExtractionError::Incomplete
            .to_string()
            .contains("'Manual Entry' or 'Scan Recipe'"));
        assert!(FetchError::Blocked.to_string().contains("Manual Entry"));
        assert!(VisionError::ServiceOverloaded
            .to_string()
            .contains("peak hours"));
    }

    #[test]
    fn test_provider_detail_is_not_shown() {
        let err = VisionError::Provider {
            detail: "invalid_request_error: image too large".to_string(),
        };
        assert!(!err.to_string().contains("invalid_request_error"));
    }

    #[test]
    fn test_import_error_is_transparent() {
        let err: ImportError = FetchError::NotFound.into();
        assert_eq!(err.user_message(), FetchError::NotFound.to_string());
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://www.example.com/a/b"), "www.example.com");
        assert_eq!(host_of("http://127.0.0.1:8080/x"), "127.0.0.1:8080");
        assert_eq!(host_of("not a url"), "not a url");
    }
}
