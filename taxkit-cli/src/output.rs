use anyhow::Result;
use serde::Serialize;

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Pretty JSON on stderr.
pub fn eprint_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    eprintln!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `{"error": true, "message": ...}` for a failed command.
pub fn error_body(err: &anyhow::Error) -> serde_json::Value {
    serde_json::json!({
        "error": true,
        "message": format!("{err:#}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_body_includes_context_chain() {
        let err = Err::<(), _>(anyhow::anyhow!("HOME is not set"))
            .context("load config")
            .unwrap_err();
        let body = error_body(&err);
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "load config: HOME is not set");
    }
}
