//! Domain models for the health API
//! Metrics, doctors, appointments, and symptom checks

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Personal health metrics shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub sleep: i64,
    pub exercise: i64,
    #[serde(rename = "waterIntake")]
    pub water_intake: i64,
    #[serde(default)]
    pub sex: Option<String>,
}

impl Default for HealthMetrics {
    /// What a user sees before their first update
    fn default() -> Self {
        Self {
            sleep: 0,
            exercise: 0,
            water_intake: 0,
            sex: Some("f/m".to_string()),
        }
    }
}

/// Directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialty: String,
}

/// Appointment booking request
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentRequest {
    /// Accepted for compatibility; the booked patient is always the caller.
    pub patient_id: i64,
    pub doctor_id: i64,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Stored appointment, denormalized with the doctor's details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub patient_id: u64,
    pub doctor_id: i64,
    pub date: DateTime<Utc>,
    pub reason: Option<String>,
    pub doctor_name: String,
    pub specialty: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub message: String,
    pub appointment: Appointment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymptomCheckRequest {
    pub symptoms: Vec<String>,
}

/// Either the matched conditions or a no-match message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymptomCheckResponse {
    Matched { matched_conditions: Vec<String> },
    NoMatch { message: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Parse a datetime; naive values are taken as UTC
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_metrics_wire_names() {
        let metrics = HealthMetrics {
            sleep: 7,
            exercise: 30,
            water_intake: 2000,
            sex: None,
        };
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "sleep": 7, "exercise": 30, "waterIntake": 2000, "sex": null })
        );

        let parsed: HealthMetrics =
            serde_json::from_str(r#"{"sleep":7,"exercise":30,"waterIntake":2000}"#).unwrap();
        assert_eq!(parsed, metrics);
    }

    #[test]
    fn test_default_metrics() {
        let json = serde_json::to_value(HealthMetrics::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "sleep": 0, "exercise": 0, "waterIntake": 0, "sex": "f/m" })
        );
    }

    #[test]
    fn test_parse_datetime_formats() {
        let expected = Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap();

        assert_eq!(parse_datetime("2030-01-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_datetime("2030-01-01T11:00:00+01:00"), Some(expected));
        assert_eq!(parse_datetime("2030-01-01T10:00:00"), Some(expected));
        assert_eq!(parse_datetime("2030-01-01 10:00:00"), Some(expected));
        assert_eq!(parse_datetime("2030-01-01T10:00"), Some(expected));
        assert_eq!(parse_datetime("next tuesday"), None);
    }

    #[test]
    fn test_appointment_request_rejects_bad_date() {
        let err = serde_json::from_str::<AppointmentRequest>(
            r#"{"patient_id":1,"doctor_id":1,"date":"soon"}"#,
        );
        assert!(err.is_err());

        let ok: AppointmentRequest = serde_json::from_str(
            r#"{"patient_id":1,"doctor_id":2,"date":"2030-06-01T09:30:00"}"#,
        )
        .unwrap();
        assert_eq!(ok.doctor_id, 2);
        assert!(ok.reason.is_none());

        let negative: AppointmentRequest = serde_json::from_str(
            r#"{"patient_id":-5,"doctor_id":-1,"date":"2030-06-01T09:30:00"}"#,
        )
        .unwrap();
        assert_eq!(negative.patient_id, -5);
        assert_eq!(negative.doctor_id, -1);
    }

    #[test]
    fn test_symptom_response_shapes() {
        let matched = SymptomCheckResponse::Matched {
            matched_conditions: vec!["Flu".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&matched).unwrap(),
            serde_json::json!({ "matched_conditions": ["Flu"] })
        );

        let none = SymptomCheckResponse::NoMatch {
            message: "nothing".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&none).unwrap(),
            serde_json::json!({ "message": "nothing" })
        );
    }
}
