//! Single definition of every enumerated option set, shared by the
//! persistence and validation layers.

pub const PAYMENT_STATUS: &[&str] = &["due", "done"];
pub const INVOICE: &[&str] = &["yes", "no"];

pub const RAM: &[&str] = &["4GB", "6GB", "8GB", "16GB", "32GB", "64GB"];
pub const SSD: &[&str] = &["120", "250", "256", "500"];
pub const PROCESSOR: &[&str] = &["i3", "i5", "i7", "i9", "i10"];
pub const OPERATING_SYSTEM: &[&str] = &["ubuntu", "mac os", "window", "hackintosh"];
pub const STORAGE: &[&str] = &["16", "32", "64", "128", "256", "512"];

pub const TECHNOLOGY: &[&str] = &[
    "Python",
    "Quality_Analyst",
    "Angular",
    "React",
    "IOS",
    "Flutter",
    "Blockchain",
    "Android",
    "SEO",
    "React-Native",
    "Node",
    "Business_Development",
    "Web_Design",
    "other",
];

const MOBILE_MIN_DIGITS: usize = 10;
const MOBILE_MAX_DIGITS: usize = 12;

/// Mobile numbers must be 10 to 12 digits, nothing else.
pub fn validate_mobile_number(number: &str) -> Result<(), String> {
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err("Please enter a valid phone number".to_string());
    }
    if number.len() < MOBILE_MIN_DIGITS || number.len() > MOBILE_MAX_DIGITS {
        return Err("Please enter correct mobile number".to_string());
    }
    Ok(())
}

/// Checks a submitted value against one of the option sets above.
/// `None`/empty is accepted; these fields are optional on the form.
pub fn validate_choice(
    field: &str,
    value: Option<&str>,
    allowed: &[&str],
) -> Result<(), String> {
    match value {
        None | Some("") => Ok(()),
        Some(v) if allowed.contains(&v) => Ok(()),
        Some(v) => Err(format!("'{}' is not a valid {}", v, field)),
    }
}

/// Same as [`validate_choice`] but for required fields.
pub fn validate_required_choice(
    field: &str,
    value: &str,
    allowed: &[&str],
) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!("'{}' is not a valid {}", value, field))
    }
}
