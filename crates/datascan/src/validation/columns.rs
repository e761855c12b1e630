//! Column-role heuristics from header names.
//!
//! Every check is a substring match on the lower-cased header, so
//! `"unit_price"` is numeric and `"is_active"` is boolean.

const NUMERIC_KEYWORDS: &[&str] = &[
    "amount", "price", "cost", "value", "number", "count", "quantity", "total", "sum", "avg",
    "average",
];

const BOOLEAN_KEYWORDS: &[&str] = &[
    "active", "enabled", "valid", "confirmed", "approved", "published", "visible",
];

const EMAIL_KEYWORDS: &[&str] = &["email", "mail"];

const DATE_KEYWORDS: &[&str] = &[
    "date", "time", "created", "updated", "modified", "birth", "start", "end", "expire",
];

const PHONE_KEYWORDS: &[&str] = &["phone", "mobile", "tel"];

fn header_contains_any(header: &str, keywords: &[&str]) -> bool {
    let lower = header.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

pub fn is_numeric_column(header: &str) -> bool {
    header_contains_any(header, NUMERIC_KEYWORDS)
}

pub fn is_boolean_column(header: &str) -> bool {
    header_contains_any(header, BOOLEAN_KEYWORDS)
}

pub fn is_email_column(header: &str) -> bool {
    header_contains_any(header, EMAIL_KEYWORDS)
}

pub fn is_date_column(header: &str) -> bool {
    header_contains_any(header, DATE_KEYWORDS)
}

pub fn is_phone_column(header: &str) -> bool {
    header_contains_any(header, PHONE_KEYWORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_matching() {
        assert!(is_numeric_column("Unit Price"));
        assert!(is_numeric_column("TOTAL_COUNT"));
        assert!(!is_numeric_column("name"));

        assert!(is_boolean_column("is_active"));
        assert!(is_boolean_column("Approved?"));

        assert!(is_email_column("E-Mail"));
        assert!(is_email_column("contact_email"));

        assert!(is_date_column("created_at"));
        assert!(is_date_column("Birthday"));
        // "end" matches inside other words too.
        assert!(is_date_column("gender"));

        assert!(is_phone_column("Mobile No"));
        assert!(is_phone_column("telephone"));
        assert!(!is_phone_column("address"));
    }

    #[test]
    fn test_roles_can_overlap() {
        // "validated_value" is both boolean ("valid") and numeric ("value").
        assert!(is_boolean_column("validated_value"));
        assert!(is_numeric_column("validated_value"));
    }
}
