//! NationBuilder v1 REST client.
//!
//! One client implements all three CRM ports. The access token rides as a
//! query parameter on every call, which is how the v1 API authenticates.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::NationBuilderConfig;
use crate::domain::donation::Donation;
use crate::domain::foundation::CrmError;
use crate::domain::membership::Membership;
use crate::domain::person::{NormalizedEmail, Person, PersonFields, PersonId};
use crate::ports::{DonationStore, MembershipStore, PersonDirectory};

use super::wire::{
    ApiErrorBody, DonationEnvelope, MembershipEnvelope, MembershipListResponse,
    MembershipResponse, PersonEnvelope, PersonResponse,
};

/// What a non-2xx response means once its body has been inspected.
#[derive(Debug)]
enum ApiFailure {
    /// The email-match endpoint found nobody. Not an error.
    NoMatches,
    Validation(String),
    Service(String),
}

/// NationBuilder REST adapter for the CRM ports.
pub struct NationBuilderClient {
    base_url: String,
    api_token: SecretString,
    http: reqwest::Client,
}

impl NationBuilderClient {
    pub fn new(config: &NationBuilderConfig) -> Self {
        Self {
            base_url: config.api_url(),
            api_token: SecretString::new(config.api_token().to_string()),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.url(path))
            .query(&[("access_token", self.api_token.expose_secret())])
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn failure_from(response: reqwest::Response) -> ApiFailure {
        let status = response.status();
        let body: ApiErrorBody = response.json().await.unwrap_or_default();

        if body.code.as_deref() == Some("no_matches") {
            return ApiFailure::NoMatches;
        }
        if status == reqwest::StatusCode::BAD_REQUEST
            || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY
        {
            return ApiFailure::Validation(body.detail());
        }
        ApiFailure::Service(format!("{}: {}", status, body.detail()))
    }

    async fn read_body<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CrmError> {
        response
            .json::<T>()
            .await
            .map_err(|err| CrmError::Service(format!("malformed response: {}", err)))
    }
}

fn transport(err: reqwest::Error) -> CrmError {
    CrmError::Service(format!("request failed: {}", err))
}

impl From<ApiFailure> for CrmError {
    fn from(failure: ApiFailure) -> Self {
        match failure {
            // callers that can see NoMatches intercept it first
            ApiFailure::NoMatches => CrmError::Service("unexpected no_matches".to_string()),
            ApiFailure::Validation(detail) => CrmError::Validation(detail),
            ApiFailure::Service(detail) => CrmError::Service(detail),
        }
    }
}

#[async_trait]
impl PersonDirectory for NationBuilderClient {
    async fn match_by_email(&self, email: &NormalizedEmail) -> Result<Option<Person>, CrmError> {
        let response = self
            .request(reqwest::Method::GET, "people/match")
            .query(&[("email", email.as_str())])
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return match Self::failure_from(response).await {
                ApiFailure::NoMatches => Ok(None),
                failure => Err(failure.into()),
            };
        }

        let body: PersonResponse = Self::read_body(response).await?;
        Ok(Some(body.person))
    }

    async fn create_person(&self, fields: &PersonFields) -> Result<Person, CrmError> {
        let response = self
            .request(reqwest::Method::POST, "people")
            .json(&PersonEnvelope { person: fields })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::failure_from(response).await.into());
        }
        let body: PersonResponse = Self::read_body(response).await?;
        Ok(body.person)
    }

    async fn update_person(
        &self,
        id: PersonId,
        fields: &PersonFields,
    ) -> Result<Person, CrmError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("people/{}", id))
            .json(&PersonEnvelope { person: fields })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::failure_from(response).await.into());
        }
        let body: PersonResponse = Self::read_body(response).await?;
        Ok(body.person)
    }
}

#[async_trait]
impl MembershipStore for NationBuilderClient {
    async fn list_memberships(
        &self,
        person: PersonId,
        page_size: u32,
    ) -> Result<Vec<Membership>, CrmError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("people/{}/memberships", person),
            )
            .query(&[("limit", page_size.to_string())])
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::failure_from(response).await.into());
        }
        let body: MembershipListResponse = Self::read_body(response).await?;
        Ok(body.results)
    }

    async fn create_membership(
        &self,
        person: PersonId,
        membership: &Membership,
    ) -> Result<Membership, CrmError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("people/{}/memberships", person),
            )
            .json(&MembershipEnvelope { membership })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::failure_from(response).await.into());
        }
        let body: MembershipResponse = Self::read_body(response).await?;
        Ok(body.membership)
    }

    async fn update_membership(
        &self,
        person: PersonId,
        membership: &Membership,
    ) -> Result<Membership, CrmError> {
        let response = self
            .request(
                reqwest::Method::PUT,
                &format!("people/{}/memberships", person),
            )
            .json(&MembershipEnvelope { membership })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::failure_from(response).await.into());
        }
        let body: MembershipResponse = Self::read_body(response).await?;
        Ok(body.membership)
    }
}

#[async_trait]
impl DonationStore for NationBuilderClient {
    async fn create_donation(&self, donation: &Donation) -> Result<(), CrmError> {
        let response = self
            .request(reqwest::Method::POST, "donations")
            .json(&DonationEnvelope { donation })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::failure_from(response).await.into());
        }
        Ok(())
    }
}
