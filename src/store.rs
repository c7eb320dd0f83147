//! In-memory stores for dashboard metrics and booked appointments

use crate::models::{Appointment, HealthMetrics};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Latest metrics per user id
#[derive(Default)]
pub struct MetricsStore {
    metrics: RwLock<HashMap<u64, HealthMetrics>>,
}

impl MetricsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored metrics, or the dashboard defaults if the user never updated
    pub fn get(&self, user_id: u64) -> HealthMetrics {
        self.metrics
            .read()
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the user's metrics wholesale
    pub fn put(&self, user_id: u64, metrics: HealthMetrics) {
        self.metrics.write().insert(user_id, metrics);
    }
}

/// Append-only list of booked appointments
#[derive(Default)]
pub struct AppointmentBook {
    appointments: RwLock<Vec<Appointment>>,
}

impl AppointmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, appointment: Appointment) {
        self.appointments.write().push(appointment);
    }

    /// Snapshot of every appointment, in booking order
    pub fn all(&self) -> Vec<Appointment> {
        self.appointments.read().clone()
    }

    pub fn len(&self) -> usize {
        self.appointments.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn appointment(patient_id: u64, doctor_id: i64) -> Appointment {
        Appointment {
            patient_id,
            doctor_id,
            date: Utc::now() + Duration::days(1),
            reason: None,
            doctor_name: "Dr. Test".to_string(),
            specialty: "Testing".to_string(),
        }
    }

    #[test]
    fn test_metrics_default_then_update() {
        let store = MetricsStore::new();
        assert_eq!(store.get(1), HealthMetrics::default());

        let update = HealthMetrics {
            sleep: 7,
            exercise: 30,
            water_intake: 2000,
            sex: None,
        };
        store.put(1, update.clone());

        assert_eq!(store.get(1), update);
        // Other users unaffected
        assert_eq!(store.get(2), HealthMetrics::default());
    }

    #[test]
    fn test_appointments_kept_in_booking_order() {
        let book = AppointmentBook::new();
        assert!(book.is_empty());

        book.push(appointment(1, 1));
        book.push(appointment(2, 3));
        book.push(appointment(1, 2));

        assert_eq!(book.len(), 3);
        let all = book.all();
        assert_eq!(
            all.iter().map(|a| (a.patient_id, a.doctor_id)).collect::<Vec<_>>(),
            vec![(1, 1), (2, 3), (1, 2)]
        );
    }
}
