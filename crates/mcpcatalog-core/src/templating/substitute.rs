//! Parameter substitution into transport templates

use std::collections::{BTreeMap, HashMap};

use regex::Captures;
use tracing::{debug, warn};

use super::placeholder::{arg_tokens, bracketed, bracketed_tokens, ANY_PLACEHOLDER, ARG_TOKEN};
use super::TemplateError;
use crate::domain::{Parameter, ParameterScope, Transport};

/// A declared parameter paired with the value that replaces it
struct Binding<'a> {
    parameter: &'a Parameter,
    value: &'a str,
    /// Bracketed forms to look for: `<name>` plus any `<token>` in the description
    tokens: Vec<String>,
    /// Name is itself a bare uppercase token, so it may be replaced unbracketed
    bare: bool,
}

impl<'a> Binding<'a> {
    fn new(parameter: &'a Parameter, value: &'a str) -> Self {
        let mut tokens = vec![bracketed(&parameter.name)];
        for name in bracketed_tokens(&parameter.description) {
            let token = bracketed(&name);
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        let bare = parameter.scope == ParameterScope::Args
            && arg_tokens(&parameter.name) == [parameter.name.as_str()];
        Self {
            parameter,
            value,
            tokens,
            bare,
        }
    }

    fn is_env(&self) -> bool {
        self.parameter.scope == ParameterScope::Env
    }

    fn matches(&self, template: &str) -> bool {
        self.tokens.iter().any(|token| template.contains(token.as_str()))
    }
}

/// Token lookup for one template string. The first binding to claim a token
/// keeps it.
struct Replacements<'b> {
    bracketed: HashMap<&'b str, &'b str>,
    bare: HashMap<&'b str, &'b str>,
}

impl<'b> Replacements<'b> {
    fn new<'a: 'b>(bindings: impl IntoIterator<Item = &'b Binding<'a>>) -> Self {
        let mut bracketed = HashMap::new();
        let mut bare = HashMap::new();
        for binding in bindings {
            for token in &binding.tokens {
                bracketed.entry(token.as_str()).or_insert(binding.value);
            }
            if binding.bare {
                bare.entry(binding.parameter.name.as_str())
                    .or_insert(binding.value);
            }
        }
        Self { bracketed, bare }
    }

    /// Single scan over the template. Inserted values are never rescanned.
    fn render(&self, template: &str) -> String {
        ANY_PLACEHOLDER
            .replace_all(template, |caps: &Captures| match caps.get(1) {
                Some(inner) => match self.bracketed.get(&caps[0]) {
                    Some(value) => value.to_string(),
                    None => bracketed(&self.render_bare(inner.as_str())),
                },
                None => self.bare_or(&caps[0]).to_string(),
            })
            .into_owned()
    }

    /// Whole uppercase runs only: `ACCESS_TOKEN` never matches inside
    /// `GITHUB_ACCESS_TOKEN`
    fn render_bare(&self, text: &str) -> String {
        ARG_TOKEN
            .replace_all(text, |caps: &Captures| self.bare_or(&caps[0]).to_string())
            .into_owned()
    }

    fn bare_or<'t>(&self, token: &'t str) -> &'t str
    where
        'b: 't,
    {
        self.bare.get(token).copied().unwrap_or(token)
    }
}

/// Resolve a transport template with user-supplied values.
///
/// Every required parameter must have a non-empty value; the first one
/// without fails the whole call with [`TemplateError::MissingParameter`].
/// Optional parameters without a value resolve to the empty string.
///
/// - args parameters replace `<name>` and bracketed tokens from their
///   description inside each argument. A name that is itself a bare
///   uppercase token (`PADDLE_API_KEY`) also replaces whole uppercase runs
///   equal to it.
/// - An env parameter named after an env key (or header key for HTTP)
///   applies to that key only. Its bracketed tokens are replaced inside the
///   value, or the whole value is replaced when it carries none of them.
///   Env parameters that name no key replace their bracketed tokens in
///   every value.
/// - The HTTP url receives every parameter's substitution.
///
/// Each string is rewritten in one pass over the template, so supplied
/// values are copied verbatim even when they look like placeholders. The
/// command and all keys are left as they are; the input is never mutated.
pub fn substitute_parameters(
    transport: &Transport,
    parameters: &[Parameter],
    values: &HashMap<String, String>,
) -> Result<Transport, TemplateError> {
    for parameter in parameters {
        parameter.validate()?;
    }

    let mut bindings = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        let value = match values.get(&parameter.name).filter(|v| !v.is_empty()) {
            Some(value) => value.as_str(),
            None if parameter.required => {
                warn!(
                    parameter = %parameter.name,
                    scope = parameter.scope.as_str(),
                    "[Substitutor] Required parameter has no value"
                );
                return Err(TemplateError::MissingParameter {
                    name: parameter.name.clone(),
                });
            }
            None => "",
        };
        bindings.push(Binding::new(parameter, value));
    }

    let resolved = match transport {
        Transport::Stdio { command, args, env } => {
            let replacements = Replacements::new(bindings.iter().filter(|b| !b.is_env()));
            Transport::Stdio {
                command: command.clone(),
                args: args.iter().map(|arg| replacements.render(arg)).collect(),
                env: resolve_map(env, &bindings),
            }
        }
        Transport::Http { url, headers } => Transport::Http {
            url: Replacements::new(&bindings).render(url),
            headers: resolve_map(headers, &bindings),
        },
    };

    debug!(
        parameters = bindings.len(),
        supplied = values.len(),
        "[Substitutor] Resolved {}",
        resolved.description()
    );

    Ok(resolved)
}

/// Env values or header values, each resolved against its own parameter
/// first and then the parameters that name no key.
fn resolve_map(
    template: &BTreeMap<String, String>,
    bindings: &[Binding<'_>],
) -> BTreeMap<String, String> {
    let unkeyed: Vec<&Binding<'_>> = bindings
        .iter()
        .filter(|b| b.is_env() && !template.contains_key(&b.parameter.name))
        .collect();

    template
        .iter()
        .map(|(key, original)| {
            let owner = bindings
                .iter()
                .find(|b| b.is_env() && b.parameter.name == *key);

            let value = match owner {
                Some(owner) if !owner.matches(original) => owner.value.to_string(),
                _ => Replacements::new(owner.into_iter().chain(unkeyed.iter().copied()))
                    .render(original),
            };
            (key.clone(), value)
        })
        .collect()
}
