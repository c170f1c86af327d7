use super::error::ConfigError;

/// Resolves `${VAR_NAME}` references in a string from environment variables,
/// so secrets like the bearer token can stay out of the config file.
///
/// Returns `ConfigError::UndefinedVariable` if a referenced variable is not
/// set. An unterminated or empty `${` is kept literally.
pub fn resolve_variables(input: &str) -> Result<String, ConfigError> {
    resolve_with(input, |name| std::env::var(name).ok())
}

fn resolve_with<F>(input: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find('}') {
            Some(0) | None => {
                // Malformed interpolation -- keep the `${` and carry on after it
                result.push_str("${");
                rest = after_open;
            }
            Some(end) => {
                let name = &after_open[..end];
                let value = lookup(name).ok_or_else(|| ConfigError::UndefinedVariable {
                    name: name.to_string(),
                })?;
                result.push_str(&value);
                rest = &after_open[end + 1..];
            }
        }
    }
    result.push_str(rest);

    Ok(result)
}
