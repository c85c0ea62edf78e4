//! ToolGateway: turns a named call into one HTTP round trip.
//!
//! For every invocation the gateway:
//! 1. Looks the tool up and validates the arguments
//! 2. Takes one snapshot of the credential store and applies the auth policy
//! 3. Builds the request and hands it to the transport
//! 4. Maps failures onto [`ErrorKind`](super::error::ErrorKind) or
//!    normalizes the body into the final text payload
//!
//! Nothing reaches the network before steps 1 and 2 pass.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::adapter::{HttpTransport, TransportFailure};
use super::adapters::RestApiAdapter;
use super::error::{map_status, map_transport, ToolError};
use super::response::normalize;
use crate::config::GatewayConfig;
use crate::credentials::CredentialStore;
use crate::tools::catalog;
use crate::tools::{Auth, BuildContext, OnSuccess, Operation, ToolSpec};

/// Dispatch table plus the shared credential store and transport.
pub struct ToolGateway {
    tools: HashMap<&'static str, ToolSpec>,
    /// Advertised order of the tools.
    order: Vec<&'static str>,
    credentials: Arc<CredentialStore>,
    transport: Arc<dyn HttpTransport>,
}

impl ToolGateway {
    /// Gateway over the full Lichess catalogue.
    pub fn new(transport: Arc<dyn HttpTransport>, credentials: Arc<CredentialStore>) -> Self {
        Self::with_tools(catalog::all_tools(), transport, credentials)
    }

    /// Gateway over an explicit tool list.
    pub fn with_tools(
        tools: Vec<ToolSpec>,
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<CredentialStore>,
    ) -> Self {
        let order = tools.iter().map(|t| t.name).collect();
        let tools = tools.into_iter().map(|t| (t.name, t)).collect();
        Self {
            tools,
            order,
            credentials,
            transport,
        }
    }

    /// Gateway with the reqwest transport and a store seeded from `config`.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, TransportFailure> {
        let transport = RestApiAdapter::new(config)?;
        let credentials = CredentialStore::with_token(config.token.clone());
        log::info!(
            "Gateway ready: {} ({}), token {}",
            transport.base_url(),
            transport.name(),
            if credentials.is_set() { "present" } else { "absent" }
        );
        Ok(Self::new(Arc::new(transport), Arc::new(credentials)))
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Tools in advertised order.
    pub fn tools(&self) -> impl Iterator<Item = &ToolSpec> + '_ {
        self.order.iter().filter_map(|name| self.tools.get(name))
    }

    pub fn tool(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.get(name)
    }

    /// Invoke a tool by name and return its text payload.
    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::validation(format!("Unknown tool: {}", name)))?;

        let args = tool.validate(arguments)?;

        let (build, on_success) = match tool.operation {
            Operation::Local(run) => {
                log::debug!("{}: running locally", tool.name);
                return run(&args, &self.credentials).map_err(|e| e.in_context(tool.action));
            }
            Operation::Remote { build, on_success } => (build, on_success),
        };

        // The store is read exactly once; the same snapshot feeds the auth
        // decision, the build context and a post-success clear.
        let snapshot = self.credentials.get();
        let bearer = match tool.auth {
            Auth::Required => Some(
                snapshot
                    .as_deref()
                    .ok_or_else(|| ToolError::missing_credential().in_context(tool.action))?,
            ),
            Auth::Optional => snapshot.as_deref(),
            Auth::Anonymous => None,
        };

        let ctx = BuildContext {
            token: snapshot.as_deref(),
        };
        let request = build(&args, &ctx).map_err(|e| e.in_context(tool.action))?;

        log::debug!(
            "{}: {} {} via {} (auth: {})",
            tool.name,
            request.method,
            request.path(),
            self.transport.name(),
            if bearer.is_some() { "bearer" } else { "none" }
        );

        let response = self
            .transport
            .send(&request, bearer)
            .await
            .map_err(|failure| map_transport(&failure, tool.action))?;

        if !response.is_success() {
            return Err(map_status(&response, tool.error_context(&args)));
        }

        if let (Some(OnSuccess::ClearCredential), Some(token)) = (on_success, snapshot.as_deref()) {
            self.credentials.clear_if(token);
        }

        let result = normalize(response.content_kind, &response.body)
            .map_err(|e| e.in_context(tool.action))?;

        if result.is_empty() {
            return Ok(format!("{} succeeded (HTTP {}).", tool.name, response.status));
        }
        Ok(result.render())
    }
}
