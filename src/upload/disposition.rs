//! Filename extraction from the Content-Disposition response header.
//!
//! Fallback order, each form tried on the whole header value:
//! RFC 5987 extended `filename*=` (with the `UTF-8''` prefix stripped),
//! quoted `filename="…"`, bare `filename=…`, then the caller's default.
//! Percent escapes are decoded in every branch, as some servers emit them
//! even in the quoted form.

use once_cell::sync::Lazy;
use regex::Regex;

static EXTENDED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"filename\*\s*=\s*(?:[Uu][Tt][Ff]-8'')?([^;]+)").unwrap());
static QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"filename\s*=\s*"([^"]+)""#).unwrap());
static BARE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"filename\s*=\s*([^;\s"]+)"#).unwrap());

/// Extract a filename from a Content-Disposition header value, if any of the
/// three parameter forms is present.
pub fn parse_filename(header: &str) -> Option<String> {
    for re in [&*EXTENDED_RE, &*QUOTED_RE, &*BARE_RE] {
        if let Some(m) = re.captures(header).and_then(|caps| caps.get(1)) {
            let raw = m.as_str().trim();
            if raw.is_empty() {
                continue;
            }
            return Some(decode(raw));
        }
    }
    None
}

/// [`parse_filename`] with the configured default as the last resort.
pub fn filename_or_default(header: Option<&str>, default: &str) -> String {
    header
        .and_then(parse_filename)
        .unwrap_or_else(|| default.to_string())
}

fn decode(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        // Escapes that are not valid UTF-8: keep the name as sent.
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_filename() {
        assert_eq!(
            parse_filename(r#"attachment; filename="Result.xlsx""#).as_deref(),
            Some("Result.xlsx")
        );
    }

    #[test]
    fn extended_filename_is_percent_decoded() {
        assert_eq!(
            parse_filename("attachment; filename*=UTF-8''Resultado%20Final.xlsx").as_deref(),
            Some("Resultado Final.xlsx")
        );
    }

    #[test]
    fn extended_charset_prefix_is_case_insensitive() {
        assert_eq!(
            parse_filename("attachment; filename*=utf-8''plan.xlsx").as_deref(),
            Some("plan.xlsx")
        );
    }

    #[test]
    fn bare_filename() {
        assert_eq!(
            parse_filename("attachment; filename=Plain.xlsx").as_deref(),
            Some("Plain.xlsx")
        );
    }

    #[test]
    fn extended_form_wins_over_quoted() {
        let header = r#"attachment; filename="fallback.xlsx"; filename*=UTF-8''preferido.xlsx"#;
        assert_eq!(parse_filename(header).as_deref(), Some("preferido.xlsx"));
    }

    #[test]
    fn non_ascii_escapes_decode() {
        assert_eq!(
            parse_filename("attachment; filename*=UTF-8''Or%C3%A7amento.xlsx").as_deref(),
            Some("Orçamento.xlsx")
        );
    }

    #[test]
    fn unrelated_header_yields_nothing() {
        assert_eq!(parse_filename("inline"), None);
        assert_eq!(parse_filename(""), None);
    }

    #[test]
    fn default_applies_when_header_missing_or_unparsable() {
        assert_eq!(
            filename_or_default(None, "AgilizaConverter.xlsx"),
            "AgilizaConverter.xlsx"
        );
        assert_eq!(
            filename_or_default(Some("inline"), "AgilizaConverter.xlsx"),
            "AgilizaConverter.xlsx"
        );
        assert_eq!(
            filename_or_default(
                Some(r#"attachment; filename="Out.xlsx""#),
                "AgilizaConverter.xlsx"
            ),
            "Out.xlsx"
        );
    }
}
