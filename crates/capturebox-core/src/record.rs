//! Client data submissions and the log records built from them.
//!
//! A submission carries four fields, each of which must be present and
//! truthy (not `null`, `false`, `0` or `""`). Values are otherwise taken
//! as-is: coordinates may arrive as numbers or strings, and `browserInfo`
//! is an arbitrary JSON value that is pretty-printed into the record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::IngestError;

/// Raw body of a client data submission. Every field is optional here so
/// that validation, not deserialization, reports what is missing.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ClientDataRequest {
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    #[serde(rename = "publicIP")]
    pub public_ip: Option<Value>,
    #[serde(rename = "browserInfo")]
    pub browser_info: Option<Value>,
}

/// A validated client data submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientData {
    pub latitude: Value,
    pub longitude: Value,
    pub public_ip: Value,
    pub browser_info: Value,
}

impl ClientDataRequest {
    /// Check that all four fields are present and truthy.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::InvalidInput`] naming the first offending field.
    pub fn validate(self) -> Result<ClientData, IngestError> {
        Ok(ClientData {
            latitude: require("latitude", self.latitude)?,
            longitude: require("longitude", self.longitude)?,
            public_ip: require("publicIP", self.public_ip)?,
            browser_info: require("browserInfo", self.browser_info)?,
        })
    }
}

fn require(field: &str, value: Option<Value>) -> Result<Value, IngestError> {
    match value {
        Some(v) if is_truthy(&v) => Ok(v),
        _ => Err(IngestError::invalid(format!(
            "missing required field '{field}'"
        ))),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// One entry of the shared client log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub data: ClientData,
}

impl LogRecord {
    /// Stamp a submission with the current time.
    #[must_use]
    pub fn now(data: ClientData) -> Self {
        Self::new(data, Utc::now())
    }

    #[must_use]
    pub fn new(data: ClientData, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, data }
    }

    /// Render the record as the text block appended to the log file.
    #[must_use]
    pub fn render(&self) -> String {
        let browser_info = serde_json::to_string_pretty(&self.data.browser_info)
            .unwrap_or_else(|_| self.data.browser_info.to_string());
        format!(
            "\nTimestamp: {}\nIP: {}\nLocation: ({}, {})\nBrowser Info: {}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            plain(&self.data.public_ip),
            plain(&self.data.latitude),
            plain(&self.data.longitude),
            browser_info,
        )
    }
}

/// Strings render bare, everything else in its JSON form.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn request(body: Value) -> ClientDataRequest {
        serde_json::from_value(body).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "latitude": 48.85,
            "longitude": 2.35,
            "publicIP": "1.2.3.4",
            "browserInfo": {"ua": "test"}
        })
    }

    fn assert_rejected(body: Value, field: &str) {
        match request(body).validate() {
            Err(IngestError::InvalidInput { reason }) => {
                assert!(reason.contains(field), "reason '{reason}' should name {field}");
            }
            other => panic!("expected InvalidInput for {field}, got {other:?}"),
        }
    }

    #[test]
    fn valid_submission_passes() {
        let data = request(valid_body()).validate().unwrap();
        assert_eq!(data.public_ip, json!("1.2.3.4"));
        assert_eq!(data.browser_info, json!({"ua": "test"}));
    }

    #[test]
    fn each_missing_field_is_rejected() {
        for field in ["latitude", "longitude", "publicIP", "browserInfo"] {
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(field);
            assert_rejected(body, field);
        }
    }

    #[test]
    fn falsy_values_are_rejected() {
        let mut body = valid_body();
        body["latitude"] = json!(0);
        assert_rejected(body, "latitude");

        let mut body = valid_body();
        body["publicIP"] = json!("");
        assert_rejected(body, "publicIP");

        let mut body = valid_body();
        body["browserInfo"] = Value::Null;
        assert_rejected(body, "browserInfo");

        let mut body = valid_body();
        body["longitude"] = json!(false);
        assert_rejected(body, "longitude");
    }

    #[test]
    fn empty_object_counts_as_present() {
        let mut body = valid_body();
        body["browserInfo"] = json!({});
        assert!(request(body).validate().is_ok());
    }

    #[test]
    fn render_matches_log_format() {
        let data = request(valid_body()).validate().unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let text = LogRecord::new(data, ts).render();

        assert_eq!(
            text,
            "\nTimestamp: 2024-01-02T03:04:05.000Z\n\
             IP: 1.2.3.4\n\
             Location: (48.85, 2.35)\n\
             Browser Info: {\n  \"ua\": \"test\"\n}\n"
        );
    }

    #[test]
    fn browser_info_keeps_client_key_order() {
        let mut body = valid_body();
        body["browserInfo"] = serde_json::from_str(
            r#"{"userAgent": "UA", "language": "fr", "platform": "Linux"}"#,
        )
        .unwrap();
        let data = request(body).validate().unwrap();

        let text = LogRecord::now(data).render();

        assert!(text.ends_with(
            "Browser Info: {\n  \"userAgent\": \"UA\",\n  \
             \"language\": \"fr\",\n  \
             \"platform\": \"Linux\"\n}\n"
        ));
    }

    #[test]
    fn string_coordinates_render_bare() {
        let mut body = valid_body();
        body["latitude"] = json!("-33.9");
        body["longitude"] = json!("151.2");
        let data = request(body).validate().unwrap();

        let text = LogRecord::now(data).render();

        assert!(text.contains("Location: (-33.9, 151.2)"));
    }
}
