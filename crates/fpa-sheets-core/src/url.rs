//! Spreadsheet URL parsing

use lazy_regex::regex;

use crate::error::{Error, Result};

/// Extract the spreadsheet id from a share URL, or pass a bare id through.
///
/// Accepts the `docs.google.com/spreadsheets/d/<id>` form with any trailing
/// path or fragment, the `drive.google.com/open?id=<id>` form, and a bare id
/// (letters, digits, `-`, `_`).
pub fn extract_spreadsheet_id(url_or_id: &str) -> Result<String> {
    if !url_or_id.starts_with("http") {
        if regex!(r"^[a-zA-Z0-9_-]+$").is_match(url_or_id) {
            return Ok(url_or_id.to_string());
        }
        return Err(Error::InvalidSpreadsheetId(url_or_id.to_string()));
    }

    for re in [
        regex!(r"docs\.google\.com/spreadsheets/d/([a-zA-Z0-9_-]+)"),
        regex!(r"drive\.google\.com/open\?id=([a-zA-Z0-9_-]+)"),
    ] {
        if let Some(caps) = re.captures(url_or_id) {
            return Ok(caps[1].to_string());
        }
    }

    Err(Error::InvalidSpreadsheetId(url_or_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_id_from_edit_url() {
        let url = "https://docs.google.com/spreadsheets/d/1AbC_dEf-123/edit#gid=0";
        assert_eq!(extract_spreadsheet_id(url).unwrap(), "1AbC_dEf-123");
    }

    #[test]
    fn extracts_id_from_bare_share_url() {
        let url = "https://docs.google.com/spreadsheets/d/1AbC_dEf-123";
        assert_eq!(extract_spreadsheet_id(url).unwrap(), "1AbC_dEf-123");
    }

    #[test]
    fn extracts_id_from_drive_open_url() {
        let url = "https://drive.google.com/open?id=1AbC_dEf-123&usp=sharing";
        assert_eq!(extract_spreadsheet_id(url).unwrap(), "1AbC_dEf-123");
    }

    #[test]
    fn passes_bare_id_through() {
        assert_eq!(extract_spreadsheet_id("1AbC_dEf-123").unwrap(), "1AbC_dEf-123");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(extract_spreadsheet_id("not a spreadsheet id").is_err());
        assert!(extract_spreadsheet_id("https://example.com/sheet/42").is_err());
        assert!(extract_spreadsheet_id("").is_err());
    }
}
