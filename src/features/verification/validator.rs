//! Pre-DNS syntactic checks for submitted email addresses.
//!
//! Standard-syntax subset: exactly one `@`, an atext local part with interior
//! dots, and a dotted, IDNA-convertible domain. Anything rejected here never
//! reaches the resolver.

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;
const MAX_LABEL_LEN: usize = 63;

#[derive(Debug, Clone)]
pub struct FormatReport {
    pub ok: bool,
    pub reasons: Vec<String>,
}

pub fn check_format(email: &str) -> FormatReport {
    let input = email.trim();
    let mut reasons = Vec::new();

    if input.len() > MAX_EMAIL_LEN {
        reasons.push(format!("total length {} > {MAX_EMAIL_LEN}", input.len()));
    }

    let parts: Vec<&str> = input.split('@').collect();
    if parts.len() != 2 {
        reasons.push("must contain exactly one '@'".to_string());
        return FormatReport { ok: false, reasons };
    }
    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        reasons.push(format!(
            "local part length {} invalid (1..={MAX_LOCAL_LEN})",
            local.len()
        ));
    }
    if !is_local_valid(local) {
        reasons.push("invalid local part".to_string());
    }

    check_domain(domain, &mut reasons);

    FormatReport {
        ok: reasons.is_empty(),
        reasons,
    }
}

/// Substring after the final `@`, the part handed to DNS.
pub fn domain_part(email: &str) -> Option<&str> {
    email.rsplit_once('@').map(|(_, domain)| domain)
}

/// IDNA (punycode) form of the domain, used for the actual MX query.
pub fn ascii_domain(domain: &str) -> Result<String, idna::Errors> {
    idna::domain_to_ascii(domain.trim())
}

// atext plus '.', with dots restricted to interior, non-consecutive positions
fn is_local_valid(s: &str) -> bool {
    if s.starts_with('.') || s.ends_with('.') || s.contains("..") {
        return false;
    }
    s.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                '!' | '#'
                    | '$'
                    | '%'
                    | '&'
                    | '\''
                    | '*'
                    | '+'
                    | '-'
                    | '/'
                    | '='
                    | '?'
                    | '^'
                    | '_'
                    | '`'
                    | '{'
                    | '|'
                    | '}'
                    | '~'
                    | '.'
            )
    })
}

fn check_domain(domain: &str, reasons: &mut Vec<String>) {
    let domain_ascii = match idna::domain_to_ascii(domain) {
        Ok(d) => d,
        Err(_) => {
            reasons.push("domain punycode conversion failed".to_string());
            return;
        }
    };

    if domain_ascii.is_empty() {
        reasons.push("domain is empty".to_string());
        return;
    }

    if !domain_ascii.contains('.') {
        reasons.push("domain must contain at least one dot".to_string());
    }

    for label in domain_ascii.split('.') {
        if label.is_empty() {
            reasons.push("empty domain label".to_string());
            continue;
        }
        if label.len() > MAX_LABEL_LEN {
            reasons.push(format!(
                "domain label '{label}' length {} > {MAX_LABEL_LEN}",
                label.len()
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            reasons.push(format!("domain label '{label}' cannot start or end with '-'"));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            reasons.push(format!("domain label '{label}' has invalid chars"));
        }
    }
}
