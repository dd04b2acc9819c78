use crate::catalog::CatalogError;
use crate::domain::models::JsonOut;
use crate::services::copier::CopyError;
use crate::services::installer::InstallError;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Stable error codes for the `--json` error envelope.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<CatalogError>() {
        return match e {
            CatalogError::CatalogNotFound(_) => "CATALOG_NOT_FOUND",
            CatalogError::RuleNotFound(_) => "RULE_NOT_FOUND",
        };
    }
    if err.downcast_ref::<CopyError>().is_some() {
        return "COPY_CONFLICT";
    }
    if err.downcast_ref::<InstallError>().is_some() {
        return "MANIFEST_MISSING";
    }
    "ERROR"
}

pub fn print_error(json: bool, err: &anyhow::Error) {
    if json {
        let envelope = serde_json::json!({
            "ok": false,
            "error": {
                "code": error_code(err),
                "message": format!("{:#}", err),
            }
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| envelope.to_string())
        );
    } else {
        eprintln!("error: {:#}", err);
    }
}
