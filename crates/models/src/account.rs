use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AccountError;

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_EMAIL_LEN: usize = 64;
pub const MAX_ADDRESS_LEN: usize = 256;
pub const MAX_PHONE_LEN: usize = 32;

/// A persisted customer account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub date_joined: NaiveDate,
}

impl Account {
    pub fn from_new(id: i64, account: NewAccount) -> Self {
        Self {
            id,
            name: account.name,
            email: account.email,
            address: account.address,
            phone_number: account.phone_number,
            date_joined: account.date_joined,
        }
    }
}

/// Validated account fields, ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub date_joined: NaiveDate,
}

/// Raw account payload as posted by clients.
///
/// Unknown fields are ignored so a serialized [`Account`] (including its `id`)
/// can be sent back as an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub date_joined: Option<String>,
}

impl AccountRequest {
    /// Parse a request body. Anything that is not a JSON object with string
    /// fields is rejected as bad data.
    pub fn from_slice(body: &[u8]) -> Result<Self, AccountError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(AccountError::InvalidAccount {
                reason: "body of request contained bad or no data".to_string(),
            });
        }
        serde_json::from_slice(body).map_err(|e| AccountError::InvalidAccount {
            reason: format!("body of request contained bad or no data - {e}"),
        })
    }

    pub fn validate(self, today: NaiveDate) -> Result<NewAccount, AccountError> {
        let name = required("name", self.name, MAX_NAME_LEN)?;
        let email = required("email", self.email, MAX_EMAIL_LEN)?;
        let address = required("address", self.address, MAX_ADDRESS_LEN)?;

        let phone_number = match self.phone_number {
            Some(phone) if phone.chars().count() > MAX_PHONE_LEN => {
                return Err(AccountError::InvalidAccount {
                    reason: format!("phone_number must be at most {MAX_PHONE_LEN} characters"),
                });
            }
            Some(phone) if phone.is_empty() => None,
            other => other,
        };

        let date_joined = match self.date_joined.as_deref() {
            None | Some("") => today,
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                AccountError::InvalidAccount {
                    reason: format!("date_joined '{raw}' is not a YYYY-MM-DD date"),
                }
            })?,
        };

        Ok(NewAccount {
            name,
            email,
            address,
            phone_number,
            date_joined,
        })
    }
}

fn required(field: &str, value: Option<String>, max_len: usize) -> Result<String, AccountError> {
    let value = value.ok_or_else(|| AccountError::InvalidAccount {
        reason: format!("missing {field}"),
    })?;
    let len = value.chars().count();
    if len == 0 || len > max_len {
        return Err(AccountError::InvalidAccount {
            reason: format!("{field} must be between 1 and {max_len} characters"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn full_request() -> AccountRequest {
        AccountRequest {
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            address: Some("12 St James's Square, London".to_string()),
            phone_number: Some("555-0100".to_string()),
            date_joined: Some("2023-11-02".to_string()),
        }
    }

    #[test]
    fn test_validate_keeps_all_fields() {
        let account = full_request().validate(today()).unwrap();
        assert_eq!(account.name, "Ada Lovelace");
        assert_eq!(account.phone_number.as_deref(), Some("555-0100"));
        assert_eq!(account.date_joined, NaiveDate::from_ymd_opt(2023, 11, 2).unwrap());
    }

    #[test]
    fn test_validate_defaults_date_joined_to_today() {
        let mut request = full_request();
        request.date_joined = None;
        let account = request.validate(today()).unwrap();
        assert_eq!(account.date_joined, today());
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let request = AccountRequest {
            name: Some("not enough data".to_string()),
            ..Default::default()
        };
        let err = request.validate(today()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Account: missing email");
    }

    #[test]
    fn test_validate_rejects_overlong_name() {
        let mut request = full_request();
        request.name = Some("x".repeat(MAX_NAME_LEN + 1));
        assert!(matches!(
            request.validate(today()),
            Err(AccountError::InvalidAccount { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        let mut request = full_request();
        request.date_joined = Some("31/12/2023".to_string());
        let err = request.validate(today()).unwrap_err();
        assert!(err.to_string().contains("date_joined"));
    }

    #[test]
    fn test_from_slice_ignores_id_and_rejects_garbage() {
        let body = br#"{"id": 7, "name": "a", "email": "b", "address": "c", "phone_number": null}"#;
        let request = AccountRequest::from_slice(body).unwrap();
        assert_eq!(request.name.as_deref(), Some("a"));
        assert!(request.phone_number.is_none());

        assert!(AccountRequest::from_slice(b"").is_err());
        assert!(AccountRequest::from_slice(b"[1, 2]").is_err());
        assert!(AccountRequest::from_slice(br#"{"name": 42}"#).is_err());
    }

    #[test]
    fn test_account_serializes_date_as_iso() {
        let account = Account::from_new(3, full_request().validate(today()).unwrap());
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["date_joined"], "2023-11-02");
    }
}
