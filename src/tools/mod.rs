//! Tool definitions: constraint descriptors, request builders and the
//! Lichess tool catalogue.
//!
//! A [`ToolSpec`] is one row of the dispatch table. It is purely
//! declarative: the gateway validates arguments with [`validator`], calls
//! the tool's build function, sends the request and normalizes the answer.
//! Adding a tool means adding a `ToolSpec` to one of the catalogue modules.

pub mod catalog;
pub mod request;
pub mod schema;
pub mod validator;

use std::fmt;

use serde_json::{json, Value};

use crate::credentials::CredentialStore;
use crate::interfaces::error::{ErrorContext, ToolError};
use request::RequestSpec;
use validator::{Args, Check, Field};

/// How a tool authenticates against Lichess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// A stored token is mandatory; without one the call fails with
    /// `MissingCredential` before any I/O.
    Required,
    /// The stored token is attached when present (public reads).
    Optional,
    /// The store's token is never attached by the transport.
    Anonymous,
}

/// Data a build function may read besides the arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildContext<'a> {
    /// Credential snapshot taken once for this invocation.
    pub token: Option<&'a str>,
}

pub type BuildFn = fn(&Args, &BuildContext<'_>) -> Result<RequestSpec, ToolError>;
pub type LocalFn = fn(&Args, &CredentialStore) -> Result<String, ToolError>;

/// Side effect applied after a confirmed successful remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnSuccess {
    /// Clear the credential that was used for the call (token revocation).
    ClearCredential,
}

#[derive(Clone)]
pub enum Operation {
    /// Runs in-process; never touches the network.
    Local(LocalFn),
    /// Builds and sends one HTTP request.
    Remote {
        build: BuildFn,
        on_success: Option<OnSuccess>,
    },
}

/// Which argument names the resource a tool addresses, for 404 messages.
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    pub label: &'static str,
    pub field: &'static str,
}

/// One entry of the dispatch table.
#[derive(Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    /// Operation phrase used in error messages ("fetch user profile").
    pub action: &'static str,
    pub description: &'static str,
    pub auth: Auth,
    pub fields: Vec<Field>,
    pub checks: Vec<Check>,
    pub resource: Option<Resource>,
    pub operation: Operation,
}

impl ToolSpec {
    /// A tool backed by one HTTP request.
    pub fn remote(
        name: &'static str,
        action: &'static str,
        description: &'static str,
        auth: Auth,
        build: BuildFn,
    ) -> Self {
        Self {
            name,
            action,
            description,
            auth,
            fields: Vec::new(),
            checks: Vec::new(),
            resource: None,
            operation: Operation::Remote {
                build,
                on_success: None,
            },
        }
    }

    /// A tool that runs entirely in-process.
    pub fn local(
        name: &'static str,
        action: &'static str,
        description: &'static str,
        run: LocalFn,
    ) -> Self {
        Self {
            name,
            action,
            description,
            auth: Auth::Anonymous,
            fields: Vec::new(),
            checks: Vec::new(),
            resource: None,
            operation: Operation::Local(run),
        }
    }

    pub fn fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn checks(mut self, checks: Vec<Check>) -> Self {
        self.checks = checks;
        self
    }

    pub fn resource(mut self, label: &'static str, field: &'static str) -> Self {
        self.resource = Some(Resource { label, field });
        self
    }

    pub fn on_success(mut self, effect: OnSuccess) -> Self {
        if let Operation::Remote { on_success, .. } = &mut self.operation {
            *on_success = Some(effect);
        }
        self
    }

    /// Validate a raw argument bag against this tool's descriptors.
    pub fn validate(&self, raw: Value) -> Result<Args, ToolError> {
        validator::validate(&self.fields, &self.checks, raw).map_err(|e| e.in_context(self.action))
    }

    /// JSON Schema advertised to protocol clients.
    pub fn input_schema(&self) -> Value {
        schema::input_schema(&self.fields, &self.checks)
    }

    /// `tools/list` entry.
    pub fn descriptor(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }

    pub fn error_context<'a>(&'a self, args: &'a Args) -> ErrorContext<'a> {
        ErrorContext {
            action: self.action,
            resource_label: self.resource.map(|r| r.label),
            resource_id: self.resource.and_then(|r| args.opt_str(r.field)),
        }
    }
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("auth", &self.auth)
            .field("fields", &self.fields.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::error::ErrorKind;

    fn build_profile(args: &Args, _ctx: &BuildContext<'_>) -> Result<RequestSpec, ToolError> {
        Ok(RequestSpec::get("/api/user").segment(args.str("username")?))
    }

    fn profile_tool() -> ToolSpec {
        ToolSpec::remote(
            "get_user_profile",
            "fetch user profile",
            "Public profile",
            Auth::Optional,
            build_profile,
        )
        .fields(vec![Field::string("username", "Username").required()])
        .resource("user", "username")
    }

    #[test]
    fn test_validation_errors_carry_action_prefix() {
        let err = profile_tool().validate(json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert_eq!(
            err.message,
            "Failed to fetch user profile: Missing required argument: username"
        );
    }

    #[test]
    fn test_descriptor_shape() {
        let descriptor = profile_tool().descriptor();
        assert_eq!(descriptor["name"], "get_user_profile");
        assert_eq!(descriptor["inputSchema"]["required"], json!(["username"]));
    }

    #[test]
    fn test_error_context_uses_resource_field() {
        let tool = profile_tool();
        let args = tool.validate(json!({"username": "chess-network"})).unwrap();
        let ctx = tool.error_context(&args);
        assert_eq!(ctx.resource_label, Some("user"));
        assert_eq!(ctx.resource_id, Some("chess-network"));
    }

    #[test]
    fn test_on_success_only_applies_to_remote() {
        let tool = profile_tool().on_success(OnSuccess::ClearCredential);
        assert!(matches!(
            tool.operation,
            Operation::Remote { on_success: Some(OnSuccess::ClearCredential), .. }
        ));

        fn noop(_: &Args, _: &CredentialStore) -> Result<String, ToolError> {
            Ok(String::new())
        }
        let local = ToolSpec::local("noop", "do nothing", "", noop).on_success(OnSuccess::ClearCredential);
        assert!(matches!(local.operation, Operation::Local(_)));
    }
}
