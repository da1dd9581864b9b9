const MAX_LOCAL_LEN: usize = 64;
const MAX_LABEL_LEN: usize = 63;

pub fn normalize_email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Dot-atom subset of RFC 5322 `addr-spec`, ASCII only.
///
/// Quoted local parts and IP-literal domains are rejected. The domain needs at
/// least two labels and an alphabetic-bearing TLD of two or more characters.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local.chars().all(|ch| ch == '.' || is_atext(ch))
}

fn is_atext(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(ch)
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    if !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }
    let tld = labels[labels.len() - 1];
    tld.len() >= 2 && !tld.chars().all(|ch| ch.is_ascii_digit())
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, normalize_email};

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  Carlos@EMAIL.com ");
        assert_eq!(value.as_deref(), Some("carlos@email.com"));
    }

    #[test]
    fn normalize_email_blank_is_none() {
        assert_eq!(normalize_email("   "), None);
    }

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "carlos@email.com",
            "Carlos.Silva@Example.COM",
            "first.last+tag@sub.example.co",
            "o'brien@example.ie",
            "user_name-1@my-host.example.org",
        ] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "invalido",
            "@example.com",
            "carlos@",
            "carlos@localhost",
            "carlos@@email.com",
            "car@los@email.com",
            ".carlos@email.com",
            "carlos.@email.com",
            "car..los@email.com",
            "carlos@-email.com",
            "carlos@email-.com",
            "carlos@email..com",
            "carlos@email.c",
            "carlos@10.0.0.1",
            "carlos silva@email.com",
            "carlos@[127.0.0.1]",
            "\"carlos\"@email.com",
            "joão@email.com",
        ] {
            assert!(!is_valid_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn rejects_overlong_local_part() {
        let local = "a".repeat(65);
        assert!(!is_valid_email(&format!("{local}@email.com")));
        let local = "a".repeat(64);
        assert!(is_valid_email(&format!("{local}@email.com")));
    }
}
