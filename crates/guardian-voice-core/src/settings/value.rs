/// A raw preference value as the host app stored it.
///
/// Hosts are inconsistent about representation (a flag may be saved as
/// `true`, `1` or `"true"`), so readers coerce permissively through
/// [`SettingValue::as_bool`] and [`SettingValue::as_int`].
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// Native boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// String.
    Text(String),
}

impl SettingValue {
    /// Boolean view: strings `"true"` (any case) or `"1"`, non-zero numbers.
    pub fn as_bool(&self) -> bool {
        match self {
            SettingValue::Bool(b) => *b,
            SettingValue::Int(n) => *n != 0,
            SettingValue::Float(f) => f.trunc() != 0.0,
            SettingValue::Text(s) => {
                let s = s.trim();
                s.eq_ignore_ascii_case("true") || s == "1"
            }
        }
    }

    /// Integer view; `None` for booleans and unparseable strings.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Bool(_) => None,
            SettingValue::Int(n) => Some(*n),
            SettingValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            SettingValue::Float(_) => None,
            SettingValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Float view for coordinates.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Bool(_) => None,
            SettingValue::Int(n) => Some(*n as f64),
            SettingValue::Float(f) => Some(*f).filter(|f| f.is_finite()),
            SettingValue::Text(s) => s.trim().parse().ok().filter(|f: &f64| f.is_finite()),
        }
    }

    /// Text view; only non-blank strings count.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}
