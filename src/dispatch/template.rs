//! Command template expansion.

use thiserror::Error;

use crate::dispatch::params::Params;

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("unclosed placeholder in {argument:?}")]
    Unclosed { argument: String },
}

/// Replace every `{name}` in each argument with its parameter value.
///
/// Unknown names expand to the empty string. Replacement text is never
/// rescanned, so values containing braces are inserted verbatim.
pub fn expand(script: &[String], params: &Params) -> Result<Vec<String>, TemplateError> {
    script.iter().map(|arg| expand_arg(arg, params)).collect()
}

fn expand_arg(arg: &str, params: &Params) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(arg.len());
    let mut rest = arg;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| TemplateError::Unclosed {
            argument: arg.to_string(),
        })?;
        let name = &after[..close];
        if let Some(value) = params.get(name) {
            out.push_str(value);
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);

    Ok(out)
}
