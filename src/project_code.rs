//! OMP project-code validation.
//!
//! UKIRT observing programs are identified by OMP codes such as `U/23A/1`
//! (semester queue), `U/SERV/192` (service), `U/DDT/4` (director's
//! discretionary time) or `U/EC/3` (engineering and commissioning). Anything
//! else found in the `PROJECT` header is treated as no project at all.

use once_cell::sync::Lazy;
use regex::Regex;

static PROJECT_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^u/(?:\d{2}[ab]|serv|ddt|ec|ukirt)/\d+[a-z]?$")
        .expect("project code pattern is valid")
});

/// Validate a raw project-code string.
///
/// Arguments
/// ---------
/// * `code`: the raw `PROJECT` header value, if any
///
/// Return
/// ------
/// * The normalized (uppercased) project code when the value matches a
///   recognized OMP code format, `None` otherwise.
pub fn valid_project_code(code: Option<&str>) -> Option<String> {
    let code = code?.trim();
    if PROJECT_CODE.is_match(code) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

#[cfg(test)]
mod project_code_test {
    use super::*;

    #[test]
    fn test_recognized_codes() {
        assert_eq!(
            valid_project_code(Some("U/23A/1")),
            Some("U/23A/1".to_owned())
        );
        assert_eq!(
            valid_project_code(Some("u/05b/42")),
            Some("U/05B/42".to_owned())
        );
        assert_eq!(
            valid_project_code(Some("U/SERV/192")),
            Some("U/SERV/192".to_owned())
        );
        assert_eq!(
            valid_project_code(Some("U/DDT/4")),
            Some("U/DDT/4".to_owned())
        );
        assert_eq!(
            valid_project_code(Some(" U/EC/3 ")),
            Some("U/EC/3".to_owned())
        );
    }

    #[test]
    fn test_rejected_codes() {
        assert_eq!(valid_project_code(None), None);
        assert_eq!(valid_project_code(Some("")), None);
        assert_eq!(valid_project_code(Some("CAL")), None);
        assert_eq!(valid_project_code(Some("JUNK/23A/1")), None);
        assert_eq!(valid_project_code(Some("U/23C/1")), None);
        assert_eq!(valid_project_code(Some("U/23A/")), None);
        assert_eq!(valid_project_code(Some("U/23A/1 extra")), None);
    }
}
