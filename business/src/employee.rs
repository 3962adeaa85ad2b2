//! Employee records as exchanged with the store.

use serde::{Deserialize, Deserializer, Serialize};

/// One employee as returned by `GET /employees`.
///
/// The store is loose about types: `salary` arrives as a number or a string and
/// text fields may be `null`. Everything is normalized to text for display,
/// filtering and editing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub manager: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub salary: String,
}

impl Employee {
    pub fn new(
        employee_id: i64,
        name: impl Into<String>,
        manager: impl Into<String>,
        salary: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: Some(employee_id),
            name: name.into(),
            manager: manager.into(),
            salary: salary.into(),
        }
    }

    /// Id as shown in the table; empty when the store omitted it.
    pub fn id_text(&self) -> String {
        self.employee_id.map(|id| id.to_string()).unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

fn nullable_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<LooseValue>::deserialize(deserializer)? {
        None => String::new(),
        Some(LooseValue::Int(value)) => value.to_string(),
        Some(LooseValue::Float(value)) => value.to_string(),
        Some(LooseValue::Bool(value)) => value.to_string(),
        Some(LooseValue::Text(value)) => value,
    })
}

/// Salary as sent to the store: a number when the text is an integer,
/// otherwise the text as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SalaryValue {
    Number(i64),
    Text(String),
}

impl SalaryValue {
    pub fn from_text(text: &str) -> Self {
        text.trim()
            .parse::<i64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(text.to_owned()))
    }
}

/// Body of `POST /employees` and `PATCH /employees/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeePayload {
    pub name: String,
    pub manager: String,
    pub salary: SalaryValue,
}
