//! Generation request payloads.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Everything the text generation profile needs to write one article.
///
/// Constructed fresh per run and never persisted. All token-bearing
/// fields arrive here already interpolated; the same values are later
/// written to the article record unchanged.
///
/// # Examples
///
/// ```
/// use vasari_core::GenerationRequest;
///
/// let request = GenerationRequest::builder()
///     .business_name("Acme")
///     .address("100 Main St")
///     .city("Plano")
///     .state("TX")
///     .phone("555-0100")
///     .canonical_url("https://acme.example.com")
///     .topic_name("Auto Insurance")
///     .subtopic_name("Teen Drivers")
///     .related_links(vec!["Contact Acme".to_string()])
///     .build()
///     .unwrap();
///
/// assert!(request.payload().contains("Teen Drivers"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct GenerationRequest {
    /// Tenant display name
    business_name: String,
    /// Street address, empty when unknown
    #[builder(default)]
    address: String,
    /// City, empty when unknown
    #[builder(default)]
    city: String,
    /// State, empty when unknown
    #[builder(default)]
    state: String,
    /// Phone number, empty when unknown
    #[builder(default)]
    phone: String,
    /// Canonical site domain
    canonical_url: String,
    /// Interpolated topic display name
    topic_name: String,
    /// Interpolated subtopic display name
    subtopic_name: String,
    /// Interpolated related-link strings
    #[builder(default)]
    related_links: Vec<String>,
}

impl GenerationRequest {
    /// Create a new builder for constructing a generation request.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// The JSON payload submitted as the run's input message.
    pub fn payload(&self) -> String {
        json!({
            "business": {
                "name": self.business_name,
                "address": self.address,
                "city": self.city,
                "state": self.state,
                "phone": self.phone,
                "website": self.canonical_url,
            },
            "topic": self.topic_name,
            "subtopic": self.subtopic_name,
            "related_links": self.related_links,
        })
        .to_string()
    }
}

/// Input for the image-prompt generation profile.
///
/// Built from the already-generated article rather than from tenant
/// data: the prompt writer works off the title and summary of what was
/// actually written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct ImagePromptRequest {
    /// Generated article title
    pub title: String,
    /// Generated article summary
    pub summary: String,
}

impl ImagePromptRequest {
    /// The JSON payload submitted as the run's input message.
    pub fn payload(&self) -> String {
        json!({
            "title": self.title,
            "content": self.summary,
        })
        .to_string()
    }
}
