//! Attack payloads and response analysis for the search form checks.
//!
//! Nothing here touches a browser. The live security checks submit each
//! payload through [`crate::HomePage::perform_search`] and feed the resulting
//! page into the functions below; an empty finding list means the shop
//! handled the payload.

use std::fmt;

/// Classic SQL injection payloads.
pub const SQL_INJECTION_PAYLOADS: &[&str] = &[
    "' OR '1'='1",
    "1; DROP TABLE users;",
    "' UNION SELECT 1,2,3 --",
    "admin'--",
    "' OR 1=1#",
];

/// Script injection payloads. Any of them executing opens an `alert()`.
pub const XSS_PAYLOADS: &[&str] = &[
    "<script>alert('XSS')</script>",
    "\"><script>alert(\"XSS\")</script>",
    "<img src=x onerror=alert('XSS')>",
    "<svg onload=alert('XSS')>",
    "javascript:alert('XSS')",
];

/// Obfuscated variants meant to slip past a web application firewall.
pub const WAF_BYPASS_PAYLOADS: &[&str] = &[
    "1' /*comment*/ and '1'='1",
    "1' /*!UNION*/ /*!SELECT*/ 1,2,3--",
    "admin' or 1=1#",
    "test' waitfor delay '00:00:01'--",
    "<img src=x onerror=\u{0061}lert(1)>",
    "<svg><script>alert&#40;1&#41;</script>",
    "javascript:alert`1`",
    "<iframe srcdoc='&lt;script&gt;alert(1)&lt;/script&gt;'>",
];

/// Template-expression payloads whose evaluation would print `49`.
pub const TEMPLATE_PAYLOADS: &[&str] = &["{{7*7}}", "${7*7}"];

/// Oversized, traversal, template, PHP and NUL-byte inputs.
#[must_use]
pub fn input_validation_payloads() -> Vec<String> {
    let mut payloads = vec!["A".repeat(1000), "../../../etc/passwd".to_string()];
    payloads.extend(TEMPLATE_PAYLOADS.iter().map(|p| (*p).to_string()));
    payloads.push("<?php echo 'test'; ?>".to_string());
    payloads.push("\0".to_string());
    payloads
}

/// Database error messages that must never reach a visitor.
pub const SQL_ERROR_SIGNATURES: &[&str] = &[
    "You have an error in your SQL syntax",
    "mysql_fetch_array()",
    "ORA-01756",
    "Unclosed quotation mark",
    "Syntax error",
    "Warning: mysql_",
    "PostgreSQL query failed",
    "ORA-00933",
    "Incorrect syntax near",
];

/// Markup that shows the shop issues anti-CSRF tokens.
pub const CSRF_INDICATORS: &[&str] = &[
    r#"name="csrf_token""#,
    r#"name="_token""#,
    r#"name="authenticity_token""#,
    r#"name="csrfmiddlewaretoken""#,
    r#"type="hidden" name="token""#,
    r#"type="hidden" name="security_hash""#,
    r#"<meta name="csrf-token""#,
    "security_hash",
    "dispatch[session_token]",
];

/// Fragments of server files or internal addresses.
pub const SYSTEM_LEAK_INDICATORS: &[&str] = &["root:x:", "[boot loader]", "127.0.0.1", "localhost"];

/// Text of block pages served by common firewalls and CDNs.
pub const WAF_BLOCK_SIGNATURES: &[&str] = &[
    "access denied",
    "request blocked",
    "web application firewall",
    "attention required! | cloudflare",
    "403 forbidden",
    "sorry, you have been blocked",
    "mod_security",
    "the requested url was rejected",
];

const WAF_BYPASS_INDICATORS: &[&str] = &[
    "you have an error in your sql syntax",
    "mysql_fetch_array()",
    "root:x:",
];

/// Something in a response that suggests a payload got through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// A database error message leaked into the page.
    SqlError(String),
    /// `/etc/passwd`-style content appeared.
    SystemDataLeak,
    /// The payload came back unescaped.
    PayloadReflected(String),
    /// A template expression was evaluated.
    TemplateEvaluated(String),
    /// A system file fragment or internal address appeared.
    SystemFileLeak(String),
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::SqlError(sig) => write!(f, "SQL error detected: {sig}"),
            Finding::SystemDataLeak => write!(f, "possible system data leak"),
            Finding::PayloadReflected(p) => write!(f, "payload reflected unescaped: {p}"),
            Finding::TemplateEvaluated(p) => write!(f, "template expression evaluated: {p}"),
            Finding::SystemFileLeak(ind) => write!(f, "system file leak: {ind}"),
        }
    }
}

/// Scans a search result page produced by a SQL injection payload.
#[must_use]
pub fn sql_injection_findings(content: &str) -> Vec<Finding> {
    let lower = content.to_lowercase();
    let mut findings: Vec<Finding> = SQL_ERROR_SIGNATURES
        .iter()
        .filter(|sig| lower.contains(&sig.to_lowercase()))
        .map(|sig| Finding::SqlError((*sig).to_string()))
        .collect();
    if content.contains("root:") {
        findings.push(Finding::SystemDataLeak);
    }
    findings
}

/// Checks whether a script payload was echoed back verbatim.
#[must_use]
pub fn xss_findings(content: &str, payload: &str) -> Vec<Finding> {
    if content.contains(payload) {
        vec![Finding::PayloadReflected(payload.to_string())]
    } else {
        Vec::new()
    }
}

/// Looks for signs that an obfuscated payload reached the application.
///
/// Returns at most one finding: the first indicator that matched.
#[must_use]
pub fn waf_bypass_findings(content: &str, payload: &str) -> Vec<Finding> {
    let lower = content.to_lowercase();
    if let Some(sig) = WAF_BYPASS_INDICATORS.iter().find(|sig| lower.contains(*sig)) {
        let finding = if *sig == "root:x:" {
            Finding::SystemDataLeak
        } else {
            Finding::SqlError((*sig).to_string())
        };
        return vec![finding];
    }
    if lower.contains(&payload.to_lowercase()) {
        return vec![Finding::PayloadReflected(payload.to_string())];
    }
    Vec::new()
}

/// Scans the response to an input validation payload.
#[must_use]
pub fn input_validation_findings(content: &str, payload: &str) -> Vec<Finding> {
    let mut findings: Vec<Finding> = SYSTEM_LEAK_INDICATORS
        .iter()
        .filter(|ind| content.contains(*ind))
        .map(|ind| Finding::SystemFileLeak((*ind).to_string()))
        .collect();
    if TEMPLATE_PAYLOADS.iter().any(|t| payload.contains(t)) && content.contains("49") {
        findings.push(Finding::TemplateEvaluated(payload.to_string()));
    }
    findings
}

/// CSRF indicators present in `content`, in catalog order.
#[must_use]
pub fn csrf_indicators_in(content: &str) -> Vec<&'static str> {
    let lower = content.to_lowercase();
    CSRF_INDICATORS
        .iter()
        .copied()
        .filter(|ind| lower.contains(*ind))
        .collect()
}

/// Whether the page is a firewall block page rather than the shop.
#[must_use]
pub fn is_waf_block(title: &str, content: &str) -> bool {
    let title = title.to_lowercase();
    let content = content.to_lowercase();
    WAF_BLOCK_SIGNATURES
        .iter()
        .any(|sig| title.contains(sig) || content.contains(sig))
}

/// A short, log-friendly rendering of a payload.
#[must_use]
pub fn payload_label(payload: &str) -> String {
    let escaped = payload.escape_debug().to_string();
    if escaped.chars().count() > 40 {
        let head: String = escaped.chars().take(37).collect();
        format!("{head}... ({} chars)", payload.chars().count())
    } else {
        escaped
    }
}
