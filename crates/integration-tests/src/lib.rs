//! Integration tests for Wellnest.
//!
//! Each test serves the storefront router on an ephemeral local port with a
//! freshly seeded store, then talks to it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wellnest-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use reqwest::Client;
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wellnest_storefront::config::StorefrontConfig;
use wellnest_storefront::state::AppState;

const TEST_JWT_SECRET: &str = "k8Qz!f2Lr7#Vw1pXc9@Nd4$Hb6^Tm3&Ys0";

/// A running storefront plus a client that remembers its bearer token.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    token: Option<String>,
}

impl TestContext {
    /// Serve a freshly seeded storefront on `127.0.0.1:0`.
    pub async fn spawn() -> Self {
        let config = StorefrontConfig::with_secret(SecretString::from(TEST_JWT_SECRET));
        let app = wellnest_storefront::app(AppState::new(config));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            token: None,
        }
    }

    /// Bearer token sent with every later request.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// POST a GraphQL operation and return the decoded response body.
    pub async fn graphql(&self, query: &str, variables: Value) -> Value {
        let mut request = self
            .client
            .post(format!("{}/graphql", self.base_url))
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        request
            .send()
            .await
            .expect("Failed to send GraphQL request")
            .json()
            .await
            .expect("GraphQL response was not JSON")
    }

    /// Register a new account and keep its token.
    pub async fn sign_up(&mut self, email: &str, password: &str) -> Value {
        let body = self
            .graphql(
                "mutation($email: String!, $password: String!) {
                    signUp(email: $email, password: $password) {
                        token
                        user { id email profileCompleted surveyCompleted }
                    }
                }",
                json!({ "email": email, "password": password }),
            )
            .await;
        let payload = body["data"]["signUp"].clone();
        self.set_token(payload["token"].as_str().map(str::to_owned));
        payload
    }
}

/// First error message of a GraphQL response, if any.
#[must_use]
pub fn first_error(body: &Value) -> Option<&str> {
    body["errors"][0]["message"].as_str()
}

/// First error code extension of a GraphQL response, if any.
#[must_use]
pub fn first_error_code(body: &Value) -> Option<&str> {
    body["errors"][0]["extensions"]["code"].as_str()
}
