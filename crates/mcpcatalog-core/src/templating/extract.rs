//! Placeholder extraction from transport templates

use tracing::debug;

use super::placeholder;
use crate::domain::{Parameter, Transport};

/// Derive the parameter list for a transport template.
///
/// - **args**: every qualifying bare uppercase token (see [`placeholder::arg_tokens`])
///   becomes a required args-scope parameter named after the token.
/// - **env**: every key becomes a required env-scope parameter; the current
///   value is kept as the description so operators see the hint
///   (e.g. `<notion-bearer-token>`).
///
/// Args parameters come first, then env parameters, each in source order.
/// Repeated names are kept as separate entries. HTTP transports yield nothing:
/// their placeholders are declared by hand when the entry is authored.
pub fn extract_parameters(transport: &Transport) -> Vec<Parameter> {
    let Transport::Stdio { args, env, .. } = transport else {
        return Vec::new();
    };

    let mut parameters: Vec<Parameter> = args
        .iter()
        .flat_map(|arg| placeholder::arg_tokens(arg))
        .map(Parameter::args)
        .collect();
    let from_args = parameters.len();

    parameters.extend(
        env.iter()
            .map(|(key, value)| Parameter::env(key.clone(), value.clone())),
    );

    debug!(
        args = from_args,
        env = parameters.len() - from_args,
        "[Extractor] Extracted parameters from {}",
        transport.description()
    );

    parameters
}
