use aws_sdk_comprehend::{
    config::http::HttpResponse,
    error::SdkError,
    operation::batch_detect_sentiment::{BatchDetectSentimentError, BatchDetectSentimentOutput},
    types::LanguageCode,
    Client as ComprehendClient,
};
use tracing::debug;

use crate::{client, config::AwsConfig};

// Comprehend scores one language per batch request.
const LANGUAGE_CODE: LanguageCode = LanguageCode::En;

// Thin wrapper over AWS Comprehend batch sentiment detection.
pub struct SentimentClient {
    client: ComprehendClient,
}

impl SentimentClient {
    pub fn new(client: ComprehendClient) -> Self {
        SentimentClient {
            client
        }
    }

    pub async fn from_config(config: &AwsConfig) -> Self {
        Self::new(client::comprehend_client(config).await)
    }

    // Submits the whole batch in one request, in caller order, and hands the
    // provider response back untouched. Batch size and per-item length limits
    // are enforced by Comprehend itself.
    pub async fn get_sentiment(
        &self,
        texts: Vec<String>,
    ) -> Result<BatchDetectSentimentOutput, SdkError<BatchDetectSentimentError, HttpResponse>> {
        debug!("submitting {} texts for sentiment detection", texts.len());
        self.client
            .batch_detect_sentiment()
            .set_text_list(Some(texts))
            .language_code(LANGUAGE_CODE)
            .send()
            .await
    }
}
