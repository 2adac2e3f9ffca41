use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

pub fn is_non_empty(value: &str) -> Result<(), String> {
    match value.trim().is_empty() {
        true => Err("must not be empty".to_string()),
        false => Ok(()),
    }
}

pub fn is_valid_email(string: &str) -> Result<(), String> {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
        r#"^(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])$"#
    ).unwrap()
    });
    // the pattern only knows about lower case
    match RE.is_match(&string.trim().to_lowercase()) {
        true => Ok(()),
        false => Err("invalid email".to_string()),
    }
}

/// Profile links have to be absolute http(s) URLs.
pub fn is_valid_profile_url(string: &str) -> Result<(), String> {
    match Url::parse(string.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        Ok(_) => Err("must be an http or https link".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
#[test]
fn test_email() {
    assert!(is_valid_email("hello@example.com").is_ok());
    assert!(is_valid_email("A@X.com").is_ok());
    assert!(is_valid_email("not an email").is_err());
    assert!(is_valid_email("a@x.com trailing").is_err());
    // needs a dotted domain
    assert!(is_valid_email("lead@localhost").is_err());
}

#[cfg(test)]
#[test]
fn test_profile_url() {
    assert!(is_valid_profile_url("https://github.com/alee").is_ok());
    assert!(is_valid_profile_url("http://linkedin.com/in/alee").is_ok());
    assert!(is_valid_profile_url("github.com/alee").is_err());
    assert!(is_valid_profile_url("ftp://example.com").is_err());
}

#[cfg(test)]
#[test]
fn test_non_empty() {
    assert!(is_non_empty("x").is_ok());
    assert!(is_non_empty("   ").is_err());
}
