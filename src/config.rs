use dotenvy;
use std::env;

const DEFAULT_REGION: &str = "eu-west-2";
const ENV_FILE: &str = "tweetpulse.env";

// Region and endpoint settings for the AWS service clients. Credentials are
// left to the ambient SDK credential chain.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub region: String,
    pub endpoint_url: Option<String>,
}

impl AwsConfig {
    pub fn default() -> Self {
        AwsConfig {
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }

    pub fn new(region: &str) -> Self {
        AwsConfig {
            region: region.to_string(),
            endpoint_url: None,
        }
    }

    // Endpoint override for pointing the clients at a local AWS stand-in.
    pub fn with_endpoint(region: &str, endpoint_url: &str) -> Self {
        AwsConfig {
            region: region.to_string(),
            endpoint_url: Some(endpoint_url.to_string()),
        }
    }

    pub fn from_env() -> Self {
        dotenvy::from_filename(ENV_FILE).ok();
        let region = env::var("REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let endpoint_url = env::var("ENDPOINT_URL").ok();
        AwsConfig {
            region,
            endpoint_url,
        }
    }
}
