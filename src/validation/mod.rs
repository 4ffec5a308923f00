//! Declarative request validation
//!
//! A rule set is an ordered list of per-field check chains run against the
//! raw JSON payload. Every field's chain is evaluated even when earlier
//! fields failed, so the caller gets the complete error list; within one
//! field the chain can opt into bail semantics and stop at its first
//! failure. Checks may be asynchronous (e.g. a uniqueness lookup against
//! the credential store) and are awaited before the error list is
//! finalized.

pub mod rules;

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use validator::ValidateEmail;

/// One failed check: the offending field and a human-readable reason
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

type CheckResult = Result<(), String>;

enum Check {
    Sync(Box<dyn Fn(&Value) -> CheckResult + Send + Sync>),
    Async(Box<dyn Fn(Value) -> BoxFuture<'static, CheckResult> + Send + Sync>),
}

/// Check chain for a single payload field.
///
/// A field is optional by default: when it is absent, null or an empty
/// string, its whole chain is skipped. `required` turns absence itself into
/// a failure.
pub struct Field {
    name: String,
    required_message: Option<String>,
    bail: bool,
    checks: Vec<Check>,
}

impl Field {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), required_message: None, bail: false, checks: Vec::new() }
    }

    /// Fail with `message` when the field is absent or empty
    pub fn required(mut self, message: &str) -> Self {
        self.required_message = Some(message.to_string());
        self
    }

    /// Stop this field's chain at its first failure. Other fields are
    /// unaffected.
    pub fn bail(mut self) -> Self {
        self.bail = true;
        self
    }

    /// Add a synchronous custom check
    pub fn custom<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> CheckResult + Send + Sync + 'static,
    {
        self.checks.push(Check::Sync(Box::new(f)));
        self
    }

    /// Add an asynchronous custom check, e.g. a store lookup. A check that
    /// fails internally should return `Err` and is treated as a failed
    /// check for this field, never as a fatal error for the request.
    pub fn custom_async<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = CheckResult> + Send + 'static,
    {
        self.checks.push(Check::Async(Box::new(move |value| Box::pin(f(value)))));
        self
    }

    pub fn is_string(self, message: &str) -> Self {
        let message = message.to_string();
        self.custom(move |v| if v.is_string() { Ok(()) } else { Err(message.clone()) })
    }

    pub fn is_integer(self, message: &str) -> Self {
        let message = message.to_string();
        self.custom(move |v| if v.is_i64() || v.is_u64() { Ok(()) } else { Err(message.clone()) })
    }

    pub fn email(self, message: &str) -> Self {
        let message = message.to_string();
        self.custom(move |v| match v.as_str() {
            Some(s) if s.validate_email() => Ok(()),
            _ => Err(message.clone()),
        })
    }

    /// Minimum length in characters; fails non-strings too
    pub fn min_length(self, min: usize, message: &str) -> Self {
        let message = message.to_string();
        self.custom(move |v| match v.as_str() {
            Some(s) if s.chars().count() >= min => Ok(()),
            _ => Err(message.clone()),
        })
    }

    pub fn matches(self, pattern: &'static regex::Regex, message: &str) -> Self {
        let message = message.to_string();
        self.custom(move |v| match v.as_str() {
            Some(s) if pattern.is_match(s) => Ok(()),
            _ => Err(message.clone()),
        })
    }
}

/// Ordered collection of field chains for one operation
#[derive(Default)]
pub struct RuleSet {
    fields: Vec<Field>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Run every chain in declaration order. Errors come back in the order
    /// the checks were declared; an empty result means the payload passed.
    pub async fn validate(&self, payload: &Value) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for field in &self.fields {
            let value = payload.get(&field.name);

            let absent = match value {
                None => true,
                Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            };

            if absent {
                if let Some(message) = &field.required_message {
                    errors.push(ValidationError {
                        field: field.name.clone(),
                        message: message.clone(),
                    });
                }
                continue;
            }

            let Some(value) = value else { continue };

            for check in &field.checks {
                let result = match check {
                    Check::Sync(f) => f(value),
                    Check::Async(f) => f(value.clone()).await,
                };

                if let Err(message) = result {
                    errors.push(ValidationError { field: field.name.clone(), message });
                    if field.bail {
                        break;
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_one_error_per_failing_independent_field() {
        let rules = RuleSet::new()
            .field(Field::new("email").required("Email is required").email("Invalid email format."))
            .field(Field::new("password").required("Password is required").min_length(
                6,
                "Password must be at least 6 characters long.",
            ));

        let errors = rules
            .validate(&json!({"email": "bad", "password": "1"}))
            .await
            .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].message, "Invalid email format.");
        assert_eq!(errors[1].field, "password");
        assert_eq!(errors[1].message, "Password must be at least 6 characters long.");
    }

    #[tokio::test]
    async fn test_errors_follow_declaration_order() {
        let rules = RuleSet::new()
            .field(Field::new("b").required("b missing"))
            .field(Field::new("a").required("a missing"));

        let errors = rules.validate(&json!({})).await.unwrap_err();
        assert_eq!(errors[0].field, "b");
        assert_eq!(errors[1].field, "a");
    }

    #[tokio::test]
    async fn test_bail_stops_only_its_own_chain() {
        let rules = RuleSet::new()
            .field(
                Field::new("title")
                    .required("Title is required")
                    .bail()
                    .is_string("Title must be a string")
                    .min_length(3, "Title too short"),
            )
            .field(Field::new("client_id").is_integer("Client ID must be an integer"));

        let errors = rules
            .validate(&json!({"title": 7, "client_id": "x"}))
            .await
            .unwrap_err();

        // title bails after the type failure; client_id still runs
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "Title must be a string");
        assert_eq!(errors[1].field, "client_id");
    }

    #[tokio::test]
    async fn test_without_bail_all_checks_of_a_field_run() {
        let rules = RuleSet::new().field(
            Field::new("title")
                .is_string("Title must be a string")
                .min_length(3, "Title too short"),
        );

        let errors = rules.validate(&json!({"title": 7})).await.unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn test_optional_field_skipped_when_absent_or_empty() {
        let rules = RuleSet::new().field(Field::new("phone").is_string("Phone must be a string"));

        assert!(rules.validate(&json!({})).await.is_ok());
        assert!(rules.validate(&json!({"phone": null})).await.is_ok());
        assert!(rules.validate(&json!({"phone": ""})).await.is_ok());
        assert!(rules.validate(&json!({"phone": 42})).await.is_err());
    }

    #[tokio::test]
    async fn test_async_check_is_awaited() {
        let rules = RuleSet::new().field(
            Field::new("email")
                .required("Email is required")
                .custom_async(|value| async move {
                    if value.as_str() == Some("taken@example.com") {
                        Err("Email is already in use".to_string())
                    } else {
                        Ok(())
                    }
                }),
        );

        assert!(rules.validate(&json!({"email": "free@example.com"})).await.is_ok());

        let errors = rules
            .validate(&json!({"email": "taken@example.com"}))
            .await
            .unwrap_err();
        assert_eq!(errors[0].message, "Email is already in use");
    }

    #[tokio::test]
    async fn test_failing_async_lookup_is_a_field_error_not_fatal() {
        let rules = RuleSet::new()
            .field(Field::new("email").custom_async(|_| async move {
                Err("Email could not be verified".to_string())
            }))
            .field(Field::new("password").required("Password is required"));

        let errors = rules.validate(&json!({"email": "a@b.com"})).await.unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "Email could not be verified");
    }

    #[tokio::test]
    async fn test_valid_payload_passes() {
        let rules = RuleSet::new()
            .field(Field::new("email").required("Email is required").email("Invalid email format."))
            .field(Field::new("password").required("Password is required").min_length(
                6,
                "Password must be at least 6 characters long.",
            ));

        assert!(rules
            .validate(&json!({"email": "a@b.com", "password": "secret1"}))
            .await
            .is_ok());
    }
}
